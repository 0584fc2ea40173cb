//! Display masking of personal and financial values

use serde::{Deserialize, Serialize};

/// Characters left visible at the end of a masked value
pub const VISIBLE_SUFFIX: usize = 4;

const MASK_CHAR: char = '*';

/// How a value is masked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskKind {
    /// Local part hidden, domain kept
    Email,
    /// Leading `+` and the last digits kept
    Phone,
    /// Country code and the last characters kept
    Iban,
    NationalId,
    Generic,
}

/// Mask `value` for display
pub fn mask(kind: MaskKind, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }

    match kind {
        MaskKind::Email => match value.rsplit_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                format!("{}@{}", stars(local.chars().count()), domain)
            }
            _ => mask_keep_suffix(value, 0),
        },
        MaskKind::Phone => match value.strip_prefix('+') {
            Some(rest) => format!("+{}", mask_keep_suffix(rest, 0)),
            None => mask_keep_suffix(value, 0),
        },
        MaskKind::Iban => {
            let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
            mask_keep_suffix(&compact, 2)
        }
        MaskKind::NationalId | MaskKind::Generic => mask_keep_suffix(value, 0),
    }
}

fn stars(count: usize) -> String {
    std::iter::repeat_n(MASK_CHAR, count).collect()
}

/// Keep `prefix` leading and [`VISIBLE_SUFFIX`] trailing characters
///
/// Values too short to hide anything are masked completely.
fn mask_keep_suffix(value: &str, prefix: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= prefix + VISIBLE_SUFFIX {
        return stars(chars.len());
    }

    let hidden = chars.len() - prefix - VISIBLE_SUFFIX;
    let mut masked = String::with_capacity(value.len());
    masked.extend(&chars[..prefix]);
    masked.push_str(&stars(hidden));
    masked.extend(&chars[chars.len() - VISIBLE_SUFFIX..]);
    masked
}
