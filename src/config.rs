//! Behavior switches for [`TextDocument`](crate::buffer::TextDocument).
//!
//! Options are expressed as flag tokens, so a harness can pass them on its
//! own command line or through the `TEXTDOC_FLAGS` environment variable.

/// Environment variable read by [`DocumentOptions::from_env`].
pub const FLAGS_ENV_VAR: &str = "TEXTDOC_FLAGS";

/// Flags controlling a document, merged from file, env and CLI sources.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Wake text-equality waiters after `set_text`, not only after edits.
    pub sweep_on_set_text: bool,
    /// Emit a `debug` event for every applied insert and delete.
    /// `None` means no flag was given; tracing is then on.
    pub trace_edits: Option<bool>,
}

impl DocumentOptions {
    /// Whether edit-level `debug` events are emitted.
    pub const fn trace_edits(&self) -> bool {
        match self.trace_edits {
            Some(enabled) => enabled,
            None => true,
        }
    }

    /// Merge two option sets. Explicit settings in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            sweep_on_set_text: self.sweep_on_set_text || other.sweep_on_set_text,
            trace_edits: other.trace_edits.or(self.trace_edits),
        }
    }

    /// Options from `TEXTDOC_FLAGS`, or defaults when it is unset.
    pub fn from_env() -> Self {
        std::env::var(FLAGS_ENV_VAR)
            .map(|raw| parse_flag_str(&raw))
            .unwrap_or_default()
    }
}

/// Parse whitespace-separated flags, ignoring anything after a `#`.
pub fn parse_flag_str(raw: &str) -> DocumentOptions {
    let tokens = raw
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(str::split_whitespace)
        .map(ToOwned::to_owned)
        .collect::<Vec<_>>();
    parse_flag_tokens(&tokens)
}

/// Unrecognized tokens are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> DocumentOptions {
    let mut options = DocumentOptions::default();
    for token in tokens {
        match token.as_str() {
            "--sweep-on-set-text" => options.sweep_on_set_text = true,
            "--trace-edits" => options.trace_edits = Some(true),
            "--no-trace-edits" => options.trace_edits = Some(false),
            _ => {}
        }
    }
    options
}
