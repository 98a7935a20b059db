// 回転暗号
// 大文字・小文字それぞれのアルファベット内で文字を回転させる。
// ASCII英字以外はそのまま残る。

const ALPHABET_LEN: u8 = 26;

/// 自己逆変換となるシフト量
pub const ROT13_SHIFT: u8 = 13;

/// `text`の英字を`shift`だけ回転
pub fn rotate(text: &str, shift: u8) -> String {
    let shift = shift % ALPHABET_LEN;
    text.chars().map(|c| rotate_char(c, shift)).collect()
}

/// ROT13。2回適用すると元に戻る
pub fn rot13(text: &str) -> String {
    rotate(text, ROT13_SHIFT)
}

fn rotate_char(c: char, shift: u8) -> char {
    let base = match c {
        'a'..='z' => b'a',
        'A'..='Z' => b'A',
        _ => return c,
    };
    let offset = (c as u8 - base + shift) % ALPHABET_LEN;
    (base + offset) as char
}

/// シフト量を保持する回転暗号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationCipher {
    shift: u8,
}

impl RotationCipher {
    pub fn new(shift: u8) -> Self {
        Self {
            shift: shift % ALPHABET_LEN,
        }
    }

    pub fn rot13() -> Self {
        Self::new(ROT13_SHIFT)
    }

    pub fn shift(&self) -> u8 {
        self.shift
    }

    pub fn encode(&self, text: &str) -> String {
        rotate(text, self.shift)
    }

    pub fn decode(&self, text: &str) -> String {
        rotate(text, (ALPHABET_LEN - self.shift) % ALPHABET_LEN)
    }

    /// `encode`がそのまま自身の逆変換になるか
    pub fn is_self_inverse(&self) -> bool {
        (self.shift * 2) % ALPHABET_LEN == 0
    }
}

impl Default for RotationCipher {
    fn default() -> Self {
        Self::rot13()
    }
}
