//! Purpose: Single-byte code pages that `encoding_rs` does not ship.
//! Exports: `CodePage` plus the `LATIN_5`, `IBM037`, `IBM1047`, `IBM437`, `IBM850`, `IBM852` tables.
//! Role: Table backend behind `Charset::CodePage`.
//! Invariants: Every table maps all 256 bytes to distinct characters, so decoding never fails.
//! Notes: ISO-8859-9 lives here because `encoding_rs` only offers its windows-1254 superset.

use std::fmt;

/// A byte-to-character table for a single-byte charset.
#[derive(Eq, PartialEq)]
pub struct CodePage {
    name: &'static str,
    table: [char; 256],
}

impl CodePage {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn encode_char(&self, ch: char) -> Option<u8> {
        // Most pages keep a character at its own code point; check that slot first.
        if let Ok(byte) = u8::try_from(u32::from(ch)) {
            if self.table[usize::from(byte)] == ch {
                return Some(byte);
            }
        }
        self.table
            .iter()
            .position(|&mapped| mapped == ch)
            .and_then(|idx| u8::try_from(idx).ok())
    }

    pub(crate) fn decode(&self, bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|&byte| self.table[usize::from(byte)])
            .collect()
    }
}

impl fmt::Debug for CodePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CodePage").field(&self.name).finish()
    }
}

#[rustfmt::skip]
pub(crate) static LATIN_5: CodePage = CodePage {
    name: "ISO-8859-9",
    table: [
        '\u{0}', '\u{1}', '\u{2}', '\u{3}', '\u{4}', '\u{5}', '\u{6}', '\u{7}',
        '\u{8}', '\u{9}', '\u{a}', '\u{b}', '\u{c}', '\u{d}', '\u{e}', '\u{f}',
        '\u{10}', '\u{11}', '\u{12}', '\u{13}', '\u{14}', '\u{15}', '\u{16}', '\u{17}',
        '\u{18}', '\u{19}', '\u{1a}', '\u{1b}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{1f}',
        ' ', '!', '"', '#', '$', '%', '&', '\'',
        '(', ')', '*', '+', ',', '-', '.', '/',
        '0', '1', '2', '3', '4', '5', '6', '7',
        '8', '9', ':', ';', '<', '=', '>', '?',
        '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G',
        'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
        'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W',
        'X', 'Y', 'Z', '[', '\\', ']', '^', '_',
        '`', 'a', 'b', 'c', 'd', 'e', 'f', 'g',
        'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
        'p', 'q', 'r', 's', 't', 'u', 'v', 'w',
        'x', 'y', 'z', '{', '|', '}', '~', '\u{7f}',
        '\u{80}', '\u{81}', '\u{82}', '\u{83}', '\u{84}', '\u{85}', '\u{86}', '\u{87}',
        '\u{88}', '\u{89}', '\u{8a}', '\u{8b}', '\u{8c}', '\u{8d}', '\u{8e}', '\u{8f}',
        '\u{90}', '\u{91}', '\u{92}', '\u{93}', '\u{94}', '\u{95}', '\u{96}', '\u{97}',
        '\u{98}', '\u{99}', '\u{9a}', '\u{9b}', '\u{9c}', '\u{9d}', '\u{9e}', '\u{9f}',
        '\u{a0}', '¡', '¢', '£', '¤', '¥', '¦', '§',
        '¨', '©', 'ª', '«', '¬', '\u{ad}', '®', '¯',
        '°', '±', '²', '³', '´', 'µ', '¶', '·',
        '¸', '¹', 'º', '»', '¼', '½', '¾', '¿',
        'À', 'Á', 'Â', 'Ã', 'Ä', 'Å', 'Æ', 'Ç',
        'È', 'É', 'Ê', 'Ë', 'Ì', 'Í', 'Î', 'Ï',
        'Ğ', 'Ñ', 'Ò', 'Ó', 'Ô', 'Õ', 'Ö', '×',
        'Ø', 'Ù', 'Ú', 'Û', 'Ü', 'İ', 'Ş', 'ß',
        'à', 'á', 'â', 'ã', 'ä', 'å', 'æ', 'ç',
        'è', 'é', 'ê', 'ë', 'ì', 'í', 'î', 'ï',
        'ğ', 'ñ', 'ò', 'ó', 'ô', 'õ', 'ö', '÷',
        'ø', 'ù', 'ú', 'û', 'ü', 'ı', 'ş', 'ÿ',
    ],
};

#[rustfmt::skip]
pub(crate) static IBM037: CodePage = CodePage {
    name: "IBM037",
    table: [
        '\u{0}', '\u{1}', '\u{2}', '\u{3}', '\u{9c}', '\u{9}', '\u{86}', '\u{7f}',
        '\u{97}', '\u{8d}', '\u{8e}', '\u{b}', '\u{c}', '\u{d}', '\u{e}', '\u{f}',
        '\u{10}', '\u{11}', '\u{12}', '\u{13}', '\u{9d}', '\u{85}', '\u{8}', '\u{87}',
        '\u{18}', '\u{19}', '\u{92}', '\u{8f}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{1f}',
        '\u{80}', '\u{81}', '\u{82}', '\u{83}', '\u{84}', '\u{a}', '\u{17}', '\u{1b}',
        '\u{88}', '\u{89}', '\u{8a}', '\u{8b}', '\u{8c}', '\u{5}', '\u{6}', '\u{7}',
        '\u{90}', '\u{91}', '\u{16}', '\u{93}', '\u{94}', '\u{95}', '\u{96}', '\u{4}',
        '\u{98}', '\u{99}', '\u{9a}', '\u{9b}', '\u{14}', '\u{15}', '\u{9e}', '\u{1a}',
        ' ', '\u{a0}', 'â', 'ä', 'à', 'á', 'ã', 'å',
        'ç', 'ñ', '¢', '.', '<', '(', '+', '|',
        '&', 'é', 'ê', 'ë', 'è', 'í', 'î', 'ï',
        'ì', 'ß', '!', '$', '*', ')', ';', '¬',
        '-', '/', 'Â', 'Ä', 'À', 'Á', 'Ã', 'Å',
        'Ç', 'Ñ', '¦', ',', '%', '_', '>', '?',
        'ø', 'É', 'Ê', 'Ë', 'È', 'Í', 'Î', 'Ï',
        'Ì', '`', ':', '#', '@', '\'', '=', '"',
        'Ø', 'a', 'b', 'c', 'd', 'e', 'f', 'g',
        'h', 'i', '«', '»', 'ð', 'ý', 'þ', '±',
        '°', 'j', 'k', 'l', 'm', 'n', 'o', 'p',
        'q', 'r', 'ª', 'º', 'æ', '¸', 'Æ', '¤',
        'µ', '~', 's', 't', 'u', 'v', 'w', 'x',
        'y', 'z', '¡', '¿', 'Ð', 'Ý', 'Þ', '®',
        '^', '£', '¥', '·', '©', '§', '¶', '¼',
        '½', '¾', '[', ']', '¯', '¨', '´', '×',
        '{', 'A', 'B', 'C', 'D', 'E', 'F', 'G',
        'H', 'I', '\u{ad}', 'ô', 'ö', 'ò', 'ó', 'õ',
        '}', 'J', 'K', 'L', 'M', 'N', 'O', 'P',
        'Q', 'R', '¹', 'û', 'ü', 'ù', 'ú', 'ÿ',
        '\\', '÷', 'S', 'T', 'U', 'V', 'W', 'X',
        'Y', 'Z', '²', 'Ô', 'Ö', 'Ò', 'Ó', 'Õ',
        '0', '1', '2', '3', '4', '5', '6', '7',
        '8', '9', '³', 'Û', 'Ü', 'Ù', 'Ú', '\u{9f}',
    ],
};

#[rustfmt::skip]
pub(crate) static IBM1047: CodePage = CodePage {
    name: "IBM1047",
    table: [
        '\u{0}', '\u{1}', '\u{2}', '\u{3}', '\u{9c}', '\u{9}', '\u{86}', '\u{7f}',
        '\u{97}', '\u{8d}', '\u{8e}', '\u{b}', '\u{c}', '\u{d}', '\u{e}', '\u{f}',
        '\u{10}', '\u{11}', '\u{12}', '\u{13}', '\u{9d}', '\u{85}', '\u{8}', '\u{87}',
        '\u{18}', '\u{19}', '\u{92}', '\u{8f}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{1f}',
        '\u{80}', '\u{81}', '\u{82}', '\u{83}', '\u{84}', '\u{a}', '\u{17}', '\u{1b}',
        '\u{88}', '\u{89}', '\u{8a}', '\u{8b}', '\u{8c}', '\u{5}', '\u{6}', '\u{7}',
        '\u{90}', '\u{91}', '\u{16}', '\u{93}', '\u{94}', '\u{95}', '\u{96}', '\u{4}',
        '\u{98}', '\u{99}', '\u{9a}', '\u{9b}', '\u{14}', '\u{15}', '\u{9e}', '\u{1a}',
        ' ', '\u{a0}', 'â', 'ä', 'à', 'á', 'ã', 'å',
        'ç', 'ñ', '¢', '.', '<', '(', '+', '|',
        '&', 'é', 'ê', 'ë', 'è', 'í', 'î', 'ï',
        'ì', 'ß', '!', '$', '*', ')', ';', '^',
        '-', '/', 'Â', 'Ä', 'À', 'Á', 'Ã', 'Å',
        'Ç', 'Ñ', '¦', ',', '%', '_', '>', '?',
        'ø', 'É', 'Ê', 'Ë', 'È', 'Í', 'Î', 'Ï',
        'Ì', '`', ':', '#', '@', '\'', '=', '"',
        'Ø', 'a', 'b', 'c', 'd', 'e', 'f', 'g',
        'h', 'i', '«', '»', 'ð', 'ý', 'þ', '±',
        '°', 'j', 'k', 'l', 'm', 'n', 'o', 'p',
        'q', 'r', 'ª', 'º', 'æ', '¸', 'Æ', '¤',
        'µ', '~', 's', 't', 'u', 'v', 'w', 'x',
        'y', 'z', '¡', '¿', 'Ð', '[', 'Þ', '®',
        '¬', '£', '¥', '·', '©', '§', '¶', '¼',
        '½', '¾', 'Ý', '¨', '¯', ']', '´', '×',
        '{', 'A', 'B', 'C', 'D', 'E', 'F', 'G',
        'H', 'I', '\u{ad}', 'ô', 'ö', 'ò', 'ó', 'õ',
        '}', 'J', 'K', 'L', 'M', 'N', 'O', 'P',
        'Q', 'R', '¹', 'û', 'ü', 'ù', 'ú', 'ÿ',
        '\\', '÷', 'S', 'T', 'U', 'V', 'W', 'X',
        'Y', 'Z', '²', 'Ô', 'Ö', 'Ò', 'Ó', 'Õ',
        '0', '1', '2', '3', '4', '5', '6', '7',
        '8', '9', '³', 'Û', 'Ü', 'Ù', 'Ú', '\u{9f}',
    ],
};

#[rustfmt::skip]
pub(crate) static IBM437: CodePage = CodePage {
    name: "IBM437",
    table: [
        '\u{0}', '\u{1}', '\u{2}', '\u{3}', '\u{4}', '\u{5}', '\u{6}', '\u{7}',
        '\u{8}', '\u{9}', '\u{a}', '\u{b}', '\u{c}', '\u{d}', '\u{e}', '\u{f}',
        '\u{10}', '\u{11}', '\u{12}', '\u{13}', '\u{14}', '\u{15}', '\u{16}', '\u{17}',
        '\u{18}', '\u{19}', '\u{1a}', '\u{1b}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{1f}',
        ' ', '!', '"', '#', '$', '%', '&', '\'',
        '(', ')', '*', '+', ',', '-', '.', '/',
        '0', '1', '2', '3', '4', '5', '6', '7',
        '8', '9', ':', ';', '<', '=', '>', '?',
        '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G',
        'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
        'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W',
        'X', 'Y', 'Z', '[', '\\', ']', '^', '_',
        '`', 'a', 'b', 'c', 'd', 'e', 'f', 'g',
        'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
        'p', 'q', 'r', 's', 't', 'u', 'v', 'w',
        'x', 'y', 'z', '{', '|', '}', '~', '\u{7f}',
        'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç',
        'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
        'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù',
        'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
        'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º',
        '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
        '░', '▒', '▓', '│', '┤', '╡', '╢', '╖',
        '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
        '└', '┴', '┬', '├', '─', '┼', '╞', '╟',
        '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
        '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫',
        '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
        'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ',
        'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
        '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈',
        '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{a0}',
    ],
};

#[rustfmt::skip]
pub(crate) static IBM850: CodePage = CodePage {
    name: "IBM850",
    table: [
        '\u{0}', '\u{1}', '\u{2}', '\u{3}', '\u{4}', '\u{5}', '\u{6}', '\u{7}',
        '\u{8}', '\u{9}', '\u{a}', '\u{b}', '\u{c}', '\u{d}', '\u{e}', '\u{f}',
        '\u{10}', '\u{11}', '\u{12}', '\u{13}', '\u{14}', '\u{15}', '\u{16}', '\u{17}',
        '\u{18}', '\u{19}', '\u{1a}', '\u{1b}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{1f}',
        ' ', '!', '"', '#', '$', '%', '&', '\'',
        '(', ')', '*', '+', ',', '-', '.', '/',
        '0', '1', '2', '3', '4', '5', '6', '7',
        '8', '9', ':', ';', '<', '=', '>', '?',
        '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G',
        'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
        'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W',
        'X', 'Y', 'Z', '[', '\\', ']', '^', '_',
        '`', 'a', 'b', 'c', 'd', 'e', 'f', 'g',
        'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
        'p', 'q', 'r', 's', 't', 'u', 'v', 'w',
        'x', 'y', 'z', '{', '|', '}', '~', '\u{7f}',
        'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç',
        'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
        'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù',
        'ÿ', 'Ö', 'Ü', 'ø', '£', 'Ø', '×', 'ƒ',
        'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º',
        '¿', '®', '¬', '½', '¼', '¡', '«', '»',
        '░', '▒', '▓', '│', '┤', 'Á', 'Â', 'À',
        '©', '╣', '║', '╗', '╝', '¢', '¥', '┐',
        '└', '┴', '┬', '├', '─', '┼', 'ã', 'Ã',
        '╚', '╔', '╩', '╦', '╠', '═', '╬', '¤',
        'ð', 'Ð', 'Ê', 'Ë', 'È', 'ı', 'Í', 'Î',
        'Ï', '┘', '┌', '█', '▄', '¦', 'Ì', '▀',
        'Ó', 'ß', 'Ô', 'Ò', 'õ', 'Õ', 'µ', 'þ',
        'Þ', 'Ú', 'Û', 'Ù', 'ý', 'Ý', '¯', '´',
        '\u{ad}', '±', '‗', '¾', '¶', '§', '÷', '¸',
        '°', '¨', '·', '¹', '³', '²', '■', '\u{a0}',
    ],
};

#[rustfmt::skip]
pub(crate) static IBM852: CodePage = CodePage {
    name: "IBM852",
    table: [
        '\u{0}', '\u{1}', '\u{2}', '\u{3}', '\u{4}', '\u{5}', '\u{6}', '\u{7}',
        '\u{8}', '\u{9}', '\u{a}', '\u{b}', '\u{c}', '\u{d}', '\u{e}', '\u{f}',
        '\u{10}', '\u{11}', '\u{12}', '\u{13}', '\u{14}', '\u{15}', '\u{16}', '\u{17}',
        '\u{18}', '\u{19}', '\u{1a}', '\u{1b}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{1f}',
        ' ', '!', '"', '#', '$', '%', '&', '\'',
        '(', ')', '*', '+', ',', '-', '.', '/',
        '0', '1', '2', '3', '4', '5', '6', '7',
        '8', '9', ':', ';', '<', '=', '>', '?',
        '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G',
        'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
        'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W',
        'X', 'Y', 'Z', '[', '\\', ']', '^', '_',
        '`', 'a', 'b', 'c', 'd', 'e', 'f', 'g',
        'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
        'p', 'q', 'r', 's', 't', 'u', 'v', 'w',
        'x', 'y', 'z', '{', '|', '}', '~', '\u{7f}',
        'Ç', 'ü', 'é', 'â', 'ä', 'ů', 'ć', 'ç',
        'ł', 'ë', 'Ő', 'ő', 'î', 'Ź', 'Ä', 'Ć',
        'É', 'Ĺ', 'ĺ', 'ô', 'ö', 'Ľ', 'ľ', 'Ś',
        'ś', 'Ö', 'Ü', 'Ť', 'ť', 'Ł', '×', 'č',
        'á', 'í', 'ó', 'ú', 'Ą', 'ą', 'Ž', 'ž',
        'Ę', 'ę', '¬', 'ź', 'Č', 'ş', '«', '»',
        '░', '▒', '▓', '│', '┤', 'Á', 'Â', 'Ě',
        'Ş', '╣', '║', '╗', '╝', 'Ż', 'ż', '┐',
        '└', '┴', '┬', '├', '─', '┼', 'Ă', 'ă',
        '╚', '╔', '╩', '╦', '╠', '═', '╬', '¤',
        'đ', 'Đ', 'Ď', 'Ë', 'ď', 'Ň', 'Í', 'Î',
        'ě', '┘', '┌', '█', '▄', 'Ţ', 'Ů', '▀',
        'Ó', 'ß', 'Ô', 'Ń', 'ń', 'ň', 'Š', 'š',
        'Ŕ', 'Ú', 'ŕ', 'Ű', 'ý', 'Ý', 'ţ', '´',
        '\u{ad}', '˝', '˛', 'ˇ', '˘', '§', '÷', '¸',
        '°', '¨', '˙', 'ű', 'Ř', 'ř', '■', '\u{a0}',
    ],
};
