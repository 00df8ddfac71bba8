//! Tab-indented line writer for routine bodies.

///
/// Body
///
/// Lines are written one tab deeper than `depth`, so depth zero is the
/// top level of a function body.
///

#[derive(Debug, Default)]
pub struct Body {
    out: String,
    depth: usize,
}

impl Body {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..=self.depth {
            self.out.push('\t');
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write `head {` and indent until the matching [`Self::close`].
    pub fn open(&mut self, head: impl AsRef<str>) {
        self.line(format!("{} {{", head.as_ref()));
        self.depth += 1;
    }

    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    /// Run `f` inside `if (cond) { .. }` when `guarded`, inline otherwise.
    pub fn guarded(&mut self, guarded: bool, cond: &str, f: impl FnOnce(&mut Self)) {
        if guarded {
            self.open(format!("if ({cond})"));
            f(self);
            self.close();
        } else {
            f(self);
        }
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

///
/// TESTS
///
