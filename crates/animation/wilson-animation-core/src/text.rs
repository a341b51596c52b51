//! Dynamic text: templates whose markers are replaced with live curve values.
//!
//! Markers:
//! - `%(graphs[ID])`: value of graph `ID`
//! - `%(paths[ID].x)` (`.y`, `.z`): one coordinate of path `ID`
//!
//! A marker may be followed by a printf-style conversion
//! `[+][0|'c][-][width][.precision](d|i|f|e|g|s)`, e.g. `%(graphs[2]).2f`,
//! with sprintf-js semantics:
//! - without a conversion, and for `f`/`g`/`s` without a precision, values
//!   print as the shortest round-tripping number (`42.0` prints as `42`,
//!   exponent form below `1e-6` and from `1e21`),
//! - `e` without a precision uses the shortest mantissa (`1.5e+3`),
//! - `.Ng` rounds to `N` significant digits, then prints the shortest form
//!   (`12345` with `.2g` prints `12000`),
//! - `'c` pads with `c`, `-` pads on the right.
//!
//! Widths are capped at 256 and precisions at 100. In dynamic templates `%%`
//! prints a single `%`; unknown `%(...)` markers are kept verbatim.
//!
//! Interpolators are pooled per referenced id, so one `update` costs one
//! evaluation per distinct graph/path however many templates share it.

use std::hash::Hash;

use hashbrown::HashMap;
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use wilson_api_core::{Project, Vector};

use crate::curve::{GraphInterpolator, PathInterpolator};

/// Any `%(...)` marker; its absence marks a template as static.
static DATA_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%\(.+?\)").expect("valid data ref pattern"));

static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"%%|%\((?:graphs\[(\d+)\]|paths\[(\d+)\]\.([xyz]))\)(\+?(?:0|'.)?-?\d*(?:\.\d+)?[difegs])?",
    )
    .expect("valid marker pattern")
});

const MAX_WIDTH: usize = 256;
const MAX_PRECISION: usize = 100;

/// Receives rendered text for a host-side target.
pub trait TextSink<K> {
    fn set_text(&mut self, target: &K, text: &str);
}

impl<K: Eq + Hash + Clone> TextSink<K> for HashMap<K, String> {
    fn set_text(&mut self, target: &K, text: &str) {
        match self.get_mut(target) {
            Some(slot) => {
                slot.clear();
                slot.push_str(text);
            }
            None => {
                self.insert(target.clone(), text.to_string());
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
    Z,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Conversion {
    plus: bool,
    pad: char,
    left: bool,
    width: Option<usize>,
    precision: Option<usize>,
    kind: char,
}

impl Conversion {
    fn parse(raw: &str) -> Option<Conversion> {
        let kind = raw.chars().last()?;
        let mut rest = &raw[..raw.len() - kind.len_utf8()];
        let plus = strip_flag(&mut rest, '+');
        let pad = if strip_flag(&mut rest, '0') {
            '0'
        } else if let Some(custom) = rest.strip_prefix('\'') {
            let mut chars = custom.chars();
            let c = chars.next()?;
            rest = chars.as_str();
            c
        } else {
            ' '
        };
        let left = strip_flag(&mut rest, '-');
        let (width, precision) = match rest.split_once('.') {
            Some((w, p)) => (w.parse().ok(), p.parse().ok()),
            None => (rest.parse().ok(), None),
        };
        Some(Conversion {
            plus,
            pad,
            left,
            width: width.map(|w: usize| w.min(MAX_WIDTH)),
            precision: precision.map(|p: usize| p.min(MAX_PRECISION)),
            kind,
        })
    }
}

fn strip_flag(rest: &mut &str, flag: char) -> bool {
    match rest.strip_prefix(flag) {
        Some(r) => {
            *rest = r;
            true
        }
        None => false,
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Segment {
    Literal(String),
    Graph {
        id: u32,
        conv: Option<Conversion>,
    },
    Path {
        id: u32,
        axis: Axis,
        conv: Option<Conversion>,
    },
}

/// A template split into literal text and value markers.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn compile(source: &str) -> Template {
        let mut segments: Vec<Segment> = Vec::new();
        let mut last = 0;
        for caps in MARKER.captures_iter(source) {
            let Some(whole) = caps.get(0) else { continue };
            push_literal(&mut segments, &source[last..whole.start()]);
            last = whole.end();
            match marker_segment(&caps) {
                Some(segment) => segments.push(segment),
                None if whole.as_str() == "%%" => push_literal(&mut segments, "%"),
                None => push_literal(&mut segments, whole.as_str()),
            }
        }
        push_literal(&mut segments, &source[last..]);
        Template { segments }
    }

    /// Graph ids referenced by the template, in order of appearance.
    pub fn graph_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Graph { id, .. } => Some(*id),
            _ => None,
        })
    }

    /// Path ids referenced by the template, in order of appearance.
    pub fn path_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Path { id, .. } => Some(*id),
            _ => None,
        })
    }

    /// Render with explicit value lookups for graph and path ids.
    pub fn render<G, P>(&self, graph: G, path: P) -> String
    where
        G: Fn(u32) -> f64,
        P: Fn(u32) -> Vector,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Graph { id, conv } => {
                    out.push_str(&format_value(graph(*id), conv.as_ref()));
                }
                Segment::Path { id, axis, conv } => {
                    let p = path(*id);
                    let v = match axis {
                        Axis::X => p.x,
                        Axis::Y => p.y,
                        Axis::Z => p.z,
                    };
                    out.push_str(&format_value(v, conv.as_ref()));
                }
            }
        }
        out
    }
}

fn push_literal(segments: &mut Vec<Segment>, s: &str) {
    if s.is_empty() {
        return;
    }
    if let Some(Segment::Literal(prev)) = segments.last_mut() {
        prev.push_str(s);
    } else {
        segments.push(Segment::Literal(s.to_string()));
    }
}

fn marker_segment(caps: &Captures<'_>) -> Option<Segment> {
    let conv = caps.get(4).and_then(|m| Conversion::parse(m.as_str()));
    if let Some(id) = caps.get(1) {
        let id = id.as_str().parse().ok()?;
        return Some(Segment::Graph { id, conv });
    }
    let id = caps.get(2)?.as_str().parse().ok()?;
    let axis = match caps.get(3)?.as_str() {
        "x" => Axis::X,
        "y" => Axis::Y,
        _ => Axis::Z,
    };
    Some(Segment::Path { id, axis, conv })
}

fn format_value(v: f64, conv: Option<&Conversion>) -> String {
    let Some(c) = conv else {
        return number_string(v);
    };
    let body = if !v.is_finite() {
        number_string(v)
    } else {
        match (c.kind, c.precision) {
            ('d' | 'i', _) => number_string(v.trunc()),
            ('f', Some(p)) => format!("{:.*}", p, v),
            ('e', Some(p)) => signed_exponent(format!("{:.*e}", p, v)),
            ('e', None) => signed_exponent(format!("{v:e}")),
            ('g', Some(p)) => number_string(to_precision(v, p)),
            ('s', Some(p)) => number_string(v).chars().take(p).collect(),
            _ => number_string(v),
        }
    };

    let numeric = c.kind != 's';
    let (sign, digits) = match body.strip_prefix('-') {
        Some(digits) if numeric => ("-", digits),
        _ if numeric && c.plus && !v.is_nan() => ("+", body.as_str()),
        _ => ("", body.as_str()),
    };
    let len = sign.len() + digits.chars().count();
    let fill = match c.width {
        Some(width) if width > len => width - len,
        _ => return format!("{sign}{digits}"),
    };
    let pad: String = std::iter::repeat(c.pad).take(fill).collect();
    if c.left {
        format!("{sign}{digits}{pad}")
    } else if c.pad == '0' {
        format!("{sign}{pad}{digits}")
    } else {
        format!("{pad}{sign}{digits}")
    }
}

/// Shortest round-tripping form, switching to an exponent outside
/// `1e-6..1e21` the way JavaScript numbers print.
fn number_string(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&v.abs()) {
        v.to_string()
    } else {
        signed_exponent(format!("{v:e}"))
    }
}

/// `1.5e3` becomes `1.5e+3`.
fn signed_exponent(s: String) -> String {
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s,
    }
}

/// `v` rounded to `digits` significant digits.
fn to_precision(v: f64, digits: usize) -> f64 {
    format!("{:.*e}", digits.max(1) - 1, v).parse().unwrap_or(v)
}

#[derive(Debug)]
struct PooledGraph {
    interp: GraphInterpolator,
    current: f64,
}

#[derive(Debug)]
struct PooledPath {
    interp: PathInterpolator,
    current: Vector,
}

#[derive(Debug)]
struct DynamicText<K> {
    target: K,
    template: Template,
}

/// Keeps registered templates in sync with interpolated values.
#[derive(Debug)]
pub struct TextEngine<K> {
    graphs: HashMap<u32, PooledGraph>,
    paths: HashMap<u32, PooledPath>,
    texts: Vec<DynamicText<K>>,
}

impl<K> Default for TextEngine<K> {
    fn default() -> Self {
        Self {
            graphs: HashMap::new(),
            paths: HashMap::new(),
            texts: Vec::new(),
        }
    }
}

impl<K: PartialEq> TextEngine<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `template` to `target`. Static templates are written to the sink
    /// once and not registered; returns whether the text is dynamic.
    /// A target bound earlier is rebound.
    pub fn add_text<S>(
        &mut self,
        project: &Project,
        target: K,
        template: &str,
        sink: &mut S,
    ) -> bool
    where
        S: TextSink<K> + ?Sized,
    {
        self.remove_text(&target);

        if !DATA_REF.is_match(template) {
            sink.set_text(&target, template);
            return false;
        }

        let template = Template::compile(template);
        for id in template.graph_ids() {
            self.graphs.entry(id).or_insert_with(|| PooledGraph {
                interp: GraphInterpolator::for_graph(project, id),
                current: 0.0,
            });
        }
        for id in template.path_ids() {
            self.paths.entry(id).or_insert_with(|| PooledPath {
                interp: PathInterpolator::for_path(project, id),
                current: Vector::ZERO,
            });
        }
        debug!(
            "text engine: registered dynamic template ({} graphs, {} paths pooled)",
            self.graphs.len(),
            self.paths.len()
        );
        self.texts.push(DynamicText { target, template });
        true
    }

    /// Stop updating `target`. Pooled interpolators stay alive for reuse.
    pub fn remove_text(&mut self, target: &K) -> bool {
        match self.texts.iter().position(|t| t.target == *target) {
            Some(idx) => {
                self.texts.remove(idx);
                debug!("text engine: removed dynamic template ({} left)", self.texts.len());
                true
            }
            None => false,
        }
    }

    /// Re-evaluate every pooled interpolator at `t`, then re-render every
    /// registered template into the sink.
    pub fn update<S>(&mut self, t: f64, sink: &mut S)
    where
        S: TextSink<K> + ?Sized,
    {
        for g in self.graphs.values_mut() {
            g.current = g.interp.interpolate(t);
        }
        for p in self.paths.values_mut() {
            p.current = p.interp.interpolate(t);
        }

        let graphs = &self.graphs;
        let paths = &self.paths;
        for text in &self.texts {
            let rendered = text.template.render(
                |id| graphs.get(&id).map(|g| g.current).unwrap_or(0.0),
                |id| paths.get(&id).map(|p| p.current).unwrap_or(Vector::ZERO),
            );
            sink.set_text(&text.target, &rendered);
        }
    }

    /// True while at least one dynamic template is registered.
    pub fn is_dirty(&self) -> bool {
        !self.texts.is_empty()
    }

    pub fn registered(&self) -> usize {
        self.texts.len()
    }

    pub fn pooled_graphs(&self) -> usize {
        self.graphs.len()
    }

    pub fn pooled_paths(&self) -> usize {
        self.paths.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_const(src: &str, g: f64, p: Vector) -> String {
        Template::compile(src).render(|_| g, |_| p)
    }

    #[test]
    fn compiles_markers_and_literals() {
        let t = Template::compile("a %(graphs[3]) b %(paths[12].y).1f %% %(other)");
        assert_eq!(t.graph_ids().collect::<Vec<_>>(), vec![3]);
        assert_eq!(t.path_ids().collect::<Vec<_>>(), vec![12]);
        assert_eq!(
            t.render(|_| 1.5, |_| Vector::new(0.0, 2.24, 0.0)),
            "a 1.5 b 2.2 % %(other)"
        );
    }

    #[test]
    fn conversions() {
        let zero = Vector::ZERO;
        assert_eq!(render_const("%(graphs[1])d", -3.7, zero), "-3");
        assert_eq!(render_const("%(graphs[1]).3f", 2.0, zero), "2.000");
        assert_eq!(render_const("%(graphs[1])+.1f", 2.0, zero), "+2.0");
        assert_eq!(render_const("%(graphs[1])06.2f", -1.5, zero), "-01.50");
        assert_eq!(render_const("%(graphs[1])5d", 42.0, zero), "   42");
        assert_eq!(render_const("%(graphs[1]).2e", 1500.0, zero), "1.50e+3");
        assert_eq!(render_const("%(graphs[1]).2e", 0.00015, zero), "1.50e-4");
        assert_eq!(render_const("%(graphs[1]).3g", 3.14159, zero), "3.14");
        assert_eq!(render_const("%(graphs[1]).2g", 12345.0, zero), "12000");
        assert_eq!(render_const("%(graphs[1])s", 0.5, zero), "0.5");
        assert_eq!(render_const("%(graphs[1]).2s", 0.125, zero), "0.");
    }

    #[test]
    fn conversions_without_precision_print_shortest_form() {
        let zero = Vector::ZERO;
        assert_eq!(render_const("%(graphs[1])f", 42.0, zero), "42");
        assert_eq!(render_const("%(graphs[1])f", 0.1, zero), "0.1");
        assert_eq!(render_const("%(graphs[1])e", 1500.0, zero), "1.5e+3");
        assert_eq!(render_const("%(graphs[1])g", 2.5, zero), "2.5");
        assert_eq!(render_const("%(graphs[1])", 1e21, zero), "1e+21");
        assert_eq!(render_const("%(graphs[1])", 1.5e-7, zero), "1.5e-7");
    }

    #[test]
    fn padding_flags() {
        let zero = Vector::ZERO;
        assert_eq!(render_const("[%(graphs[1])-8.2f]", 3.14159, zero), "[3.14    ]");
        assert_eq!(render_const("%(graphs[1])'*6d", 42.0, zero), "****42");
        assert_eq!(render_const("%(graphs[1])+'_6d", -7.0, zero), "____-7");
        assert_eq!(render_const("%(graphs[1])06s", 0.5, zero), "0000.5");
    }

    #[test]
    fn oversized_width_is_capped() {
        let text = render_const("%(graphs[1])18000000000000000000d", 1.0, Vector::ZERO);
        assert_eq!(text.len(), MAX_WIDTH);
        assert!(text.ends_with(" 1"));
        let text = render_const("%(graphs[1]).999999f", 1.0, Vector::ZERO);
        assert_eq!(text.len(), 2 + MAX_PRECISION);
    }

    #[test]
    fn plain_markers_use_display() {
        assert_eq!(render_const("%(graphs[0])", 42.0, Vector::ZERO), "42");
        assert_eq!(render_const("%(graphs[0]) m", 0.25, Vector::ZERO), "0.25 m");
    }

    #[test]
    fn sink_overwrites_existing_text() {
        let mut sink: HashMap<&str, String> = HashMap::new();
        sink.set_text(&"a", "one");
        sink.set_text(&"a", "two");
        assert_eq!(sink.get("a").map(String::as_str), Some("two"));
    }

    fn ramp_project() -> Project {
        use wilson_api_core::{Graph, Interpolation};
        Project {
            graphs: vec![Graph::new(1, "ramp", Interpolation::Linear)
                .with_point(0.0, 0.0)
                .with_point(10.0, 10.0)],
            ..Default::default()
        }
    }

    #[test]
    fn removing_the_last_template_clears_dirty() {
        let project = ramp_project();
        let mut engine = TextEngine::new();
        let mut sink: HashMap<&str, String> = HashMap::new();

        assert!(engine.add_text(&project, "a", "%(graphs[1])", &mut sink));
        assert!(engine.add_text(&project, "b", "b %(graphs[1])", &mut sink));
        assert!(engine.is_dirty());

        assert!(engine.remove_text(&"a"));
        assert!(!engine.remove_text(&"a"));
        assert!(engine.is_dirty());
        assert!(engine.remove_text(&"b"));
        assert!(!engine.is_dirty());
        assert_eq!(engine.registered(), 0);
        // pooled interpolators outlive their templates
        assert_eq!(engine.pooled_graphs(), 1);

        engine.update(5.0, &mut sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn rebinding_to_static_text_unregisters() {
        let project = ramp_project();
        let mut engine = TextEngine::new();
        let mut sink: HashMap<&str, String> = HashMap::new();

        assert!(engine.add_text(&project, "t", "%(graphs[1])", &mut sink));
        engine.update(4.0, &mut sink);
        assert_eq!(sink["t"], "4");

        assert!(!engine.add_text(&project, "t", "static", &mut sink));
        assert!(!engine.is_dirty());
        assert_eq!(sink["t"], "static");
        engine.update(6.0, &mut sink);
        assert_eq!(sink["t"], "static");
    }

    #[test]
    fn rebinding_replaces_the_template() {
        let project = ramp_project();
        let mut engine = TextEngine::new();
        let mut sink: HashMap<&str, String> = HashMap::new();

        engine.add_text(&project, "t", "x %(graphs[1])", &mut sink);
        engine.add_text(&project, "t", "y %(graphs[1]).1f", &mut sink);
        assert_eq!(engine.registered(), 1);
        engine.update(2.0, &mut sink);
        assert_eq!(sink["t"], "y 2.0");
    }
}
