//! Work-arrangement classification for a single listing.
//!
//! Three keyword rules produce independent signals; an ordered decision
//! ladder turns signals plus the `allowRemote` flag and the presence of a
//! physical location into exactly one label.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::normalize::normalize;

/// One work-arrangement label for a single job record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkArrangement {
    Hybrid,
    Remote,
    OnSite,
    Other,
}

impl WorkArrangement {
    /// User-facing label, in the wording the tool's audience expects.
    pub fn label(&self) -> &'static str {
        match self {
            WorkArrangement::Hybrid => "Híbrido",
            WorkArrangement::Remote => "Remoto",
            WorkArrangement::OnSite => "Presencial",
            WorkArrangement::Other => "Outro (ou não especificado)",
        }
    }
}

impl fmt::Display for WorkArrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Text signal a keyword rule can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Hybrid,
    Remote,
    OnSite,
}

/// Keyword rules, kept as data so the precedence in `classify` stays the
/// only place that encodes decision order. Patterns run against normalized
/// text and match whole words only.
const SIGNAL_RULES: &[(Signal, &str)] = &[
    (Signal::Hybrid, r"(?i)\b(h[íi]brido|hybrid)\b"),
    (
        Signal::Remote,
        r"(?i)\b(remoto|remote|teletrabalho|work from home|wfh)\b",
    ),
    (Signal::OnSite, r"(?i)\b(presencial|on-site|no escrit[óo]rio)\b"),
];

static COMPILED_RULES: LazyLock<Vec<(Signal, Regex)>> = LazyLock::new(|| {
    SIGNAL_RULES
        .iter()
        .map(|(signal, pattern)| (*signal, Regex::new(pattern).unwrap()))
        .collect()
});

#[derive(Debug, Default)]
struct Signals {
    hybrid: bool,
    remote: bool,
    onsite: bool,
}

fn detect_signals(text: &str) -> Signals {
    let mut signals = Signals::default();
    for (signal, re) in COMPILED_RULES.iter() {
        if re.is_match(text) {
            match signal {
                Signal::Hybrid => signals.hybrid = true,
                Signal::Remote => signals.remote = true,
                Signal::OnSite => signals.onsite = true,
            }
        }
    }
    signals
}

/// Derive the work arrangement of one record from its free text, its
/// location list and the `allowRemote` flag.
///
/// Absent fields are empty strings/slices; exactly one label is always
/// returned. The ladder order is load-bearing: a hybrid keyword beats
/// everything, and a remote signal next to a physical location also reads
/// as hybrid.
pub fn classify(
    title: &str,
    body: &str,
    location_names: &[&str],
    allow_remote: bool,
) -> WorkArrangement {
    let joined = format!("{} {} {}", title, body, location_names.join(" "));
    let text = normalize(&joined);

    let signals = detect_signals(&text);
    let has_remote = allow_remote || signals.remote;
    let has_location = !location_names.is_empty();

    if signals.hybrid {
        WorkArrangement::Hybrid
    } else if has_remote && has_location {
        WorkArrangement::Hybrid
    } else if has_remote {
        WorkArrangement::Remote
    } else if signals.onsite || has_location {
        WorkArrangement::OnSite
    } else {
        WorkArrangement::Other
    }
}

// ── Tests ──
