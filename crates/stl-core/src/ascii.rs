//! ASCII STL decoding
//!
//! The text is read as whitespace-separated tokens:
//!
//! ```text
//! solid <name>
//!   facet normal <f> <f> <f>
//!     outer loop
//!       vertex <f> <f> <f>
//!       vertex <f> <f> <f>
//!       vertex <f> <f> <f>
//!     endloop
//!   endfacet
//! endsolid <name>
//! ```
//!
//! Anything outside `solid ... endsolid` is ignored, and a file may contain several
//! solids. Inside a facet the structure is strict: exactly one normal and exactly three
//! vertices, otherwise the whole parse fails.

use std::iter::Peekable;

use crate::error::StlError;
use crate::soup::TriangleSoup;

const SOLID: &str = "solid";
const END_SOLID: &str = "endsolid";

/// Decode ASCII STL text
pub fn decode_ascii(text: &str) -> Result<TriangleSoup, StlError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    // A lone carriage return also ends a line
    let lines = text.lines().flat_map(|line| line.split('\r'));
    let tokens = lines.enumerate().flat_map(|(line, content)| {
        content
            .split_whitespace()
            .map(move |text| Token { line, text })
    });

    let mut parser = Parser {
        tokens: tokens.peekable(),
        soup: TriangleSoup::default(),
        facets: 0,
    };
    parser.parse()?;
    Ok(parser.soup)
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    line: usize,
    text: &'a str,
}

struct Parser<I: Iterator> {
    tokens: Peekable<I>,
    soup: TriangleSoup,
    /// Facets started so far, across all solids
    facets: usize,
}

impl<'a, I: Iterator<Item = Token<'a>>> Parser<I> {
    fn parse(&mut self) -> Result<(), StlError> {
        while let Some(token) = self.tokens.next() {
            if token.text.starts_with(SOLID) {
                self.parse_solid(token)?;
            }
        }
        Ok(())
    }

    fn parse_solid(&mut self, open: Token<'a>) -> Result<(), StlError> {
        let name = self.read_name(open);
        if self.soup.name.is_none() && !name.is_empty() {
            self.soup.name = Some(name.join(" "));
        }
        let first_facet = self.facets;

        loop {
            let Some(token) = self.tokens.next() else {
                tracing::warn!(
                    "Solid starting on line {} has no endsolid",
                    open.line + 1
                );
                break;
            };

            if token.text.starts_with(END_SOLID) {
                // Skip the closing name, which may itself start with "solid", but stop
                // at the next block when several share a line
                while self
                    .tokens
                    .next_if(|t| {
                        t.line == token.line && (!t.text.starts_with(SOLID) || name.contains(&t.text))
                    })
                    .is_some()
                {}
                break;
            }
            if token.text == "facet" {
                self.parse_facet()?;
            }
        }

        tracing::trace!(
            "Solid on line {}: {} facets",
            open.line + 1,
            self.facets - first_facet
        );
        Ok(())
    }

    /// Solid name parts: a suffix glued to the keyword plus the rest of the line
    fn read_name(&mut self, open: Token<'a>) -> Vec<&'a str> {
        let mut parts = Vec::new();
        let glued = &open.text[SOLID.len()..];
        if !glued.is_empty() {
            parts.push(glued);
        }

        while let Some(token) = self
            .tokens
            .next_if(|t| t.line == open.line && t.text != "facet" && !t.text.starts_with(END_SOLID))
        {
            parts.push(token.text);
        }
        parts
    }

    fn parse_facet(&mut self) -> Result<(), StlError> {
        self.facets += 1;
        let facet = self.facets;

        let mut normal = None;
        let mut corners: Vec<[f32; 3]> = Vec::with_capacity(3);

        loop {
            let Some(token) = self.tokens.next() else {
                return Err(StlError::UnterminatedFacet { facet });
            };

            match token.text {
                "endfacet" => break,
                "facet" => return Err(StlError::UnterminatedFacet { facet }),
                "normal" => {
                    let n = self.read_triple(facet)?;
                    if normal.replace(n).is_some() {
                        return Err(StlError::MalformedFacetNormal { facet });
                    }
                }
                "vertex" => corners.push(self.read_triple(facet)?),
                text if text.starts_with(END_SOLID) => {
                    return Err(StlError::UnterminatedFacet { facet });
                }
                // outer, loop, endloop
                _ => {}
            }
        }

        let Some(normal) = normal else {
            return Err(StlError::MalformedFacetNormal { facet });
        };
        if corners.len() != 3 {
            return Err(StlError::MalformedFacetVertexCount {
                facet,
                count: corners.len(),
            });
        }

        self.soup.face_normals.push(normal);
        self.soup.vertices.extend(corners);
        Ok(())
    }

    fn read_triple(&mut self, facet: usize) -> Result<[f32; 3], StlError> {
        let mut triple = [0.0; 3];
        for component in &mut triple {
            let Some(token) = self.tokens.next() else {
                return Err(StlError::UnterminatedFacet { facet });
            };
            *component = parse_number(token.text).ok_or_else(|| StlError::MalformedNumber {
                facet,
                token: token.text.to_string(),
            })?;
        }
        Ok(triple)
    }
}

/// Parse a decimal floating-point literal: `[+-]digits[.digits][(e|E)[+-]digits]`
///
/// Either side of the decimal point may be empty, but not both. Spellings such as
/// `inf` or `NaN` are rejected.
fn parse_number(token: &str) -> Option<f32> {
    let bytes = token.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_digits = digits(i);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        frac_digits = digits(i);
        i += frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_digits = digits(i);
        if exp_digits == 0 {
            return None;
        }
        i += exp_digits;
    }

    if i != bytes.len() {
        return None;
    }
    token.parse().ok()
}
