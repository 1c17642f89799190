use std::fmt::Write as _;

/// Axis-aligned rectangle in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Shrinks the frame by the given amount on each side.
    pub fn inset(&self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            x: self.x + left,
            y: self.y + top,
            width: (self.width - left - right).max(0.0),
            height: (self.height - top - bottom).max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TextStyle<'a> {
    pub size: f64,
    pub fill: &'a str,
    pub anchor: Anchor,
    pub bold: bool,
    /// Rotation in degrees around the text origin.
    pub rotate: Option<f64>,
}

impl<'a> TextStyle<'a> {
    pub fn new(size: f64, fill: &'a str) -> Self {
        Self {
            size,
            fill,
            anchor: Anchor::Start,
            bold: false,
            rotate: None,
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }
}

/// Accumulates SVG markup. Writing into a `String` cannot fail, so the
/// `fmt::Result`s are discarded.
pub(crate) struct Svg {
    buf: String,
}

impl Svg {
    pub fn new(width: f64, height: f64) -> Self {
        let mut buf = String::with_capacity(64 * 1024);
        let _ = writeln!(
            buf,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="'Open Sans', verdana, arial, sans-serif">"#
        );
        Self { buf }
    }

    pub fn rect(&mut self, frame: Frame, fill: &str) {
        let _ = writeln!(
            self.buf,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{fill}"/>"#,
            frame.x, frame.y, frame.width, frame.height
        );
    }

    pub fn rect_with_tooltip(&mut self, frame: Frame, fill: &str, tooltip: &str) {
        let _ = writeln!(
            self.buf,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{fill}"><title>{}</title></rect>"#,
            frame.x,
            frame.y,
            frame.width,
            frame.height,
            escape(tooltip)
        );
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str, width: f64) {
        let _ = writeln!(
            self.buf,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{stroke}" stroke-width="{width}"/>"#,
            from.0, from.1, to.0, to.1
        );
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], stroke: &str, width: f64) {
        let mut coords = String::with_capacity(points.len() * 16);
        for (x, y) in points {
            let _ = write!(coords, "{x:.2},{y:.2} ");
        }
        let _ = writeln!(
            self.buf,
            r#"<polyline points="{}" fill="none" stroke="{stroke}" stroke-width="{width}" stroke-linejoin="round"/>"#,
            coords.trim_end()
        );
    }

    pub fn circle(&mut self, center: (f64, f64), radius: f64, fill: &str, outline: Option<(&str, f64)>, tooltip: &str) {
        let outline = outline
            .map(|(stroke, width)| format!(r#" stroke="{stroke}" stroke-width="{width}""#))
            .unwrap_or_default();
        let _ = writeln!(
            self.buf,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{fill}"{outline}><title>{}</title></circle>"#,
            center.0,
            center.1,
            radius,
            escape(tooltip)
        );
    }

    pub fn text(&mut self, position: (f64, f64), content: &str, style: TextStyle<'_>) {
        let weight = if style.bold { r#" font-weight="bold""# } else { "" };
        let transform = style
            .rotate
            .map(|deg| format!(r#" transform="rotate({deg} {:.2} {:.2})""#, position.0, position.1))
            .unwrap_or_default();
        let _ = writeln!(
            self.buf,
            r#"<text x="{:.2}" y="{:.2}" font-size="{}" fill="{}" text-anchor="{}" dominant-baseline="middle"{weight}{transform}>{}</text>"#,
            position.0,
            position.1,
            style.size,
            style.fill,
            style.anchor.as_str(),
            escape(content)
        );
    }

    /// Vertical gradient from `stops[0]` at the bottom to the last stop at the top.
    pub fn vertical_gradient(&mut self, id: &str, stops: &[(f64, String)]) {
        let _ = writeln!(
            self.buf,
            r#"<defs><linearGradient id="{id}" x1="0" y1="1" x2="0" y2="0">"#
        );
        for (offset, color) in stops {
            let _ = writeln!(self.buf, r#"<stop offset="{offset}" stop-color="{color}"/>"#);
        }
        let _ = writeln!(self.buf, "</linearGradient></defs>");
    }

    pub fn rect_with_gradient(&mut self, frame: Frame, gradient_id: &str) {
        let _ = writeln!(
            self.buf,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="url(#{gradient_id})"/>"#,
            frame.x, frame.y, frame.width, frame.height
        );
    }

    pub fn finish(mut self) -> String {
        self.buf.push_str("</svg>\n");
        self.buf
    }
}

/// Escapes text for use in SVG/HTML content and attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
