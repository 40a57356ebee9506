/*!
 * Heuristic sentence boundary detection.
 *
 * Periods that do not end a sentence (titles, initials, acronyms, company
 * suffixes, domain names) are first swapped for a private placeholder by an
 * ordered list of boundary rules. Every remaining `.`, `?` and `!` is then a
 * sentence terminator. Rule order matters: later rules see the text as the
 * earlier ones left it.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// @const: Stands in for a period that must not end a sentence
const PROTECTED_PERIOD: &str = "\u{1}";

// @const: Marks a confirmed sentence end
const BOUNDARY: &str = "\u{2}";

const TITLE_PREFIXES: &str = "(Mr|St|Mrs|Ms|Dr)";
const SUFFIXES: &str = "(Inc|Ltd|Jr|Sr|Co)";
const STARTERS: &str =
    r"(Mr|Mrs|Ms|Dr|He\s|She\s|It\s|They\s|Their\s|Our\s|We\s|But\s|However\s|That\s|This\s|Wherever)";
const ACRONYM: &str = "([A-Z][.][A-Z][.](?:[A-Z][.])?)";
const WEBSITES: &str = "(com|net|org|io|gov)";
const LETTER: &str = "([A-Za-z])";

/// One substitution step of the boundary-protection pipeline
pub struct BoundaryRule {
    /// Short identifier, useful when tracing a surprising split
    pub name: &'static str,
    pattern: Regex,
    replacement: String,
}

impl BoundaryRule {
    fn new(name: &'static str, pattern: &str, replacement: String) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    /// Apply this rule to every non-overlapping occurrence in `text`
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

static BOUNDARY_RULES: Lazy<Vec<BoundaryRule>> = Lazy::new(|| {
    let p = PROTECTED_PERIOD;
    let b = BOUNDARY;
    vec![
        BoundaryRule::new(
            "title_prefix",
            &format!("{}[.]", TITLE_PREFIXES),
            format!("${{1}}{}", p),
        ),
        BoundaryRule::new(
            "website_suffix",
            &format!("[.]{}", WEBSITES),
            format!("{}${{1}}", p),
        ),
        BoundaryRule::new("doctorate", r"Ph\.D\.", format!("Ph{p}D{p}")),
        BoundaryRule::new(
            "spaced_initial",
            &format!(r"\s{}[.] ", LETTER),
            format!(" ${{1}}{} ", p),
        ),
        // An acronym directly followed by a pronoun or conjunction ends a sentence
        BoundaryRule::new(
            "acronym_before_starter",
            &format!("{} {}", ACRONYM, STARTERS),
            format!("${{1}}{} ${{2}}", b),
        ),
        BoundaryRule::new(
            "acronym_triplet",
            &format!("{l}[.]{l}[.]{l}[.]", l = LETTER),
            format!("${{1}}{p}${{2}}{p}${{3}}{p}"),
        ),
        BoundaryRule::new(
            "acronym_pair",
            &format!("{l}[.]{l}[.]", l = LETTER),
            format!("${{1}}{p}${{2}}{p}"),
        ),
        // The suffix's own period is consumed by the boundary here
        BoundaryRule::new(
            "suffix_before_starter",
            &format!(" {}[.] {}", SUFFIXES, STARTERS),
            format!(" ${{1}}{} ${{2}}", b),
        ),
        BoundaryRule::new(
            "suffix",
            &format!(" {}[.]", SUFFIXES),
            format!(" ${{1}}{}", p),
        ),
        BoundaryRule::new(
            "single_letter",
            &format!(" {}[.]", LETTER),
            format!(" ${{1}}{}", p),
        ),
    ]
});

/// The boundary rules in the order they are applied
pub fn boundary_rules() -> &'static [BoundaryRule] {
    &BOUNDARY_RULES
}

/// Put closing quotes inside the terminator so `."` ends on the `.`
fn reorder_closing_quotes(text: &str) -> String {
    text.replace(".\u{201d}", "\u{201d}.")
        .replace(".\"", "\".")
        .replace("!\"", "\"!")
        .replace("?\"", "\"?")
}

fn mark_boundaries(text: &str) -> String {
    text.replace('.', &format!(".{}", BOUNDARY))
        .replace('?', &format!("?{}", BOUNDARY))
        .replace('!', &format!("!{}", BOUNDARY))
}

/// Split a block of text into trimmed sentences, in order.
///
/// Abbreviated titles, initials, dotted acronyms, company suffixes and
/// domain names do not end a sentence. Text after the last terminator is
/// kept as a final sentence when it holds anything besides whitespace.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut working = format!(" {}  ", text).replace('\n', " ");

    for rule in boundary_rules() {
        working = rule.apply(&working);
    }

    let working = mark_boundaries(&reorder_closing_quotes(&working));
    let working = working.replace(PROTECTED_PERIOD, ".");

    working
        .split(BOUNDARY)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}
