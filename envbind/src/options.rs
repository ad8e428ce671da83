//! Option-list parsing for directive strings.
//!
//! A directive has the shape `KEY[,name[=value],...]`. The first segment is
//! the environment variable key; every following segment is an option. There
//! is no escaping, so option values cannot contain `,`.

use std::iter::FusedIterator;

/// A single `name[=value]` option from a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opt<'a> {
    /// Text before the first `=`, or the whole segment.
    pub name: &'a str,
    /// Text after the first `=`, empty when the segment has none.
    pub value: &'a str,
}

impl<'a> Opt<'a> {
    fn from_segment(segment: &'a str) -> Self {
        match segment.split_once('=') {
            Some((name, value)) => Self { name, value },
            None => Self {
                name: segment,
                value: "",
            },
        }
    }
}

/// Lazy iterator over the options of a directive.
///
/// Consumed once. Parse the source string again for a fresh pass.
#[derive(Debug)]
pub struct Options<'a> {
    rest: &'a str,
}

impl<'a> Options<'a> {
    /// Iterate over a comma-separated option list (without the key).
    pub fn new(opts: &'a str) -> Self {
        Self { rest: opts }
    }
}

impl<'a> Iterator for Options<'a> {
    type Item = Opt<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        // A trailing comma leaves `rest` empty, so the final empty segment
        // is never yielded.
        let segment = match self.rest.split_once(',') {
            Some((head, tail)) => {
                self.rest = tail;
                head
            }
            None => std::mem::take(&mut self.rest),
        };

        Some(Opt::from_segment(segment))
    }
}

impl FusedIterator for Options<'_> {}

/// Split a directive into its key and the options that follow it.
pub fn split_directive(directive: &str) -> (&str, Options<'_>) {
    match directive.split_once(',') {
        Some((key, opts)) => (key, Options::new(opts)),
        None => (directive, Options::new("")),
    }
}
