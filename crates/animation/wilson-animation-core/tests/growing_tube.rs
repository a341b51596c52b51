use wilson_animation_core::{
    export_geometry_json, Color, ColorScale, Config, GrowingTube, Project, TubeColor,
    TubeUpdate, Vector,
};
use wilson_api_core::parse_project_json;
use wilson_test_fixtures::projects;

fn project() -> Project {
    let json = projects::json("growing-tube").expect("growing-tube fixture");
    parse_project_json(&json).expect("growing-tube fixture should validate")
}

fn tube(project: &Project, name: &str) -> GrowingTube {
    let tube = project
        .tubes
        .iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("no tube named {name}"));
    GrowingTube::from_tube(tube, project, &Config::default())
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn xs(points: &[Vector]) -> Vec<f64> {
    points.iter().map(|p| p.x).collect()
}

#[test]
fn keyframes_merge_path_and_radius_times() {
    let project = project();
    let grower = tube(&project, "grower");
    assert_eq!(grower.keyframes(), &[0.0, 1.0, 2.0, 3.0]);
    assert_eq!(grower.start_time(), 0.0);
    assert_eq!(grower.end_time(), 3.0);
}

#[test]
fn dangling_path_has_no_geometry() {
    let project = project();
    let mut dangling = tube(&project, "dangling");
    assert!(!dangling.has_geometry());
    assert!(dangling.geometry_at(1.0).is_none());
    assert_eq!(dangling.update(1.0), TubeUpdate::NoGeometry);
}

#[test]
fn past_the_end_is_complete() {
    let project = project();
    let grower = tube(&project, "grower");
    let g = grower.geometry_at(3.5).unwrap();
    assert_eq!(g.len(), 4);
    assert_eq!(xs(&g.points), vec![0.0, 1.0, 2.0, 3.0]);
    assert!(approx(g.radii[0], 0.5));
    assert!(approx(g.radii[3], 2.0));
    assert_eq!(g.tex_coords[0], 0.0);
    assert_eq!(g.tex_coords[3], 1.0);
}

#[test]
fn start_renders_empty_over_every_point() {
    let project = project();
    let grower = tube(&project, "grower");
    for t in [0.0, 5e-5] {
        let g = grower.geometry_at(t).unwrap();
        assert_eq!(g.len(), 6);
        assert!(g.radii.iter().all(|r| *r == 0.0));
        assert_eq!(xs(&g.points), vec![0.0, 1.0, 2.0, 3.0, 3.0, 3.0]);
    }
}

#[test]
fn partial_tube_ends_in_offset_tip() {
    let project = project();
    let grower = tube(&project, "grower");
    let g = grower.geometry_at(1.5).unwrap();
    assert_eq!(g.len(), 6);

    assert_eq!(g.points[2], Vector::new(1.5, 0.0, 0.0));
    let offset = g.points[3].sub(g.points[2]);
    assert!(approx(offset.x, 1e-6));
    assert_eq!(offset.y, 0.0);
    assert_eq!(g.points[4], Vector::new(2.0, 0.0, 0.0));

    assert!(approx(g.radii[0], 0.5));
    assert!(approx(g.radii[1], 1.0));
    assert_eq!(g.radii[2], 1.25);
    assert!(g.radii[3..].iter().all(|r| *r == 0.0));

    assert_eq!(g.tex_coords[2], 0.5);
    assert_eq!(g.tex_coords[3], 0.5);
}

#[test]
fn tip_on_a_keyframe_keeps_precomputed_points() {
    let project = project();
    let grower = tube(&project, "grower");
    let g = grower.geometry_at(2.0).unwrap();
    assert_eq!(xs(&g.points), vec![0.0, 1.0, 2.0, 3.0, 3.0, 3.0]);
    assert!(approx(g.radii[2], 1.5));
    assert_eq!(&g.radii[3..], &[0.0, 0.0, 0.0]);
}

#[test]
fn non_growing_tube_builds_once() {
    let project = project();
    let mut fixed = tube(&project, "static");
    assert!(!fixed.is_growing());
    assert!(matches!(fixed.update(0.5), TubeUpdate::Rebuilt(g) if g.len() == 4));
    assert!(matches!(fixed.update(1.0), TubeUpdate::Unchanged(_)));
    assert!(fixed.geometry().unwrap().radii.iter().all(|r| *r == 0.25));
    assert_eq!(
        fixed.color(),
        &TubeColor::Static(Color::rgba(0.0, 1.0, 0.0, 1.0))
    );
}

#[test]
fn growing_tube_rebuilds_while_extending() {
    let project = project();
    let mut grower = tube(&project, "grower");
    assert!(matches!(grower.update(1.5), TubeUpdate::Rebuilt(_)));
    assert!(matches!(grower.update(1.6), TubeUpdate::Rebuilt(_)));
    assert!(matches!(grower.update(4.0), TubeUpdate::Rebuilt(_)));
    assert!(matches!(grower.update(5.0), TubeUpdate::Unchanged(_)));
    assert!(matches!(grower.update(0.0), TubeUpdate::Rebuilt(g) if g.len() == 6));
    assert!(matches!(grower.update(0.0), TubeUpdate::Unchanged(_)));
}

#[test]
fn graph_color_bakes_a_gradient() {
    let project = project();
    let grower = tube(&project, "grower");
    let TubeColor::Gradient(texture) = grower.color() else {
        panic!("expected a baked gradient");
    };
    assert_eq!(texture.resolution(), Config::default().gradient_resolution);
    let scale = ColorScale::from_project(&project);
    let mid = texture.color_at(0.5, &scale);
    assert!((mid.r - 0.5).abs() < 1e-3);
    assert_eq!(mid.a, 1.0);
}

#[test]
fn geometry_exports_as_json() {
    let project = project();
    let grower = tube(&project, "grower");
    let json = export_geometry_json(&grower.geometry_at(3.5).unwrap());
    assert_eq!(json["points"][1]["x"], 1.0);
    assert_eq!(json["radii"].as_array().map(Vec::len), Some(4));
}
