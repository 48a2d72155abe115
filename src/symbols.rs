//! Chart symbols and text contrast.

use crate::error::{PatternError, Result};

/// Symbols in assignment order. The printable-ASCII and Latin-1 part comes
/// first so typical palettes stay inside the standard PDF font encoding.
const SYMBOL_ROWS: [&str; 7] = [
    "+*#%@&=~^!?$/\\|<>()[]{}0123456789:;\"',.-_`",
    "¡¢£¤¥¦§¨©«¬®¯°±²³´¶·¸¹»¼½¾¿×÷",
    "■□▲△▼▽◆◇○●◐◑◒◓★☆♠♣♥♦♤♧♡♢♪♫☀☁☂☃☎☯☺☻♀♂",
    "←↑→↓↔↕↖↗↘↙⇐⇑⇒⇓⇔",
    "∀∂∃∅∇∈∉∋∏∑∓∗∘√∝∞∟∠∧∨∩∪∫∴∵∼≅≈≠≡≤≥⊂⊃⊄⊆⊇⊕⊗⊥⋅",
    "▪▫▬▭▮▯▰▱►◄◊◌◍◎◘◙◦◯◢◣◤◥",
    "✓✔✕✖✗✘✚✛✜✝✞✟✠✡✢✣✤✥✦✧✩✪✫✬✭✮✯✰✱✲✳✴✵✶✷✸✹✺✻✼✽✾✿❀❁❂❃❄❅❆❇❈❉❊❋",
];

pub fn symbol_table() -> impl Iterator<Item = char> {
    SYMBOL_ROWS.iter().flat_map(|row| row.chars())
}

pub fn symbol_capacity() -> usize {
    symbol_table().count()
}

/// One distinct non-letter symbol per palette index.
pub fn assign_symbols(n: usize) -> Result<Vec<char>> {
    if n == 0 {
        return Err(PatternError::InvalidParameter(
            "at least one symbol must be requested".to_string(),
        ));
    }
    let symbols: Vec<char> = symbol_table().take(n).collect();
    if symbols.len() < n {
        return Err(PatternError::InvalidParameter(format!(
            "requested {} symbols but only {} are available",
            n,
            symbols.len()
        )));
    }
    Ok(symbols)
}

/// Black or white, whichever reads better on `background` (BT.601 luma).
pub fn contrast_color(background: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = background;
    let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    if luma > 128.0 {
        [0, 0, 0]
    } else {
        [255, 255, 255]
    }
}
