//! Key decoding
//!
//! Turns raw bytes from a remote terminal into [`KeyInput`]s. Decoding is
//! stateless: each call sees one read from the channel. An escape sequence
//! split across two reads decodes as a lone Esc followed by plain text.

use folio_app::KeyInput;

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;
const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;

/// Decode every key in `bytes`, in order.
///
/// Unknown escape sequences, Alt combinations, stray control bytes and
/// invalid UTF-8 are dropped. Never panics.
pub fn decode(bytes: &[u8]) -> Vec<KeyInput> {
    let mut keys = Vec::new();
    let mut rest = bytes;

    while !rest.is_empty() {
        let (key, used) = next_key(rest);
        keys.extend(key);
        rest = rest.get(used.max(1)..).unwrap_or_default();
    }
    keys
}

/// Decode the key at the start of `input`, returning it with the number of
/// bytes it spans.
fn next_key(input: &[u8]) -> (Option<KeyInput>, usize) {
    match input {
        [] => (None, 0),
        [ESC] | [ESC, ESC, ..] => (Some(KeyInput::Esc), 1),
        [ESC, b'[', tail @ ..] => {
            let (key, used) = csi(tail);
            (key, 2 + used)
        },
        [ESC, b'O', last, ..] => (cursor_key(*last), 3),
        // Alt+key
        [ESC, tail @ ..] => (None, 1 + utf8(tail).1),
        [b'\r', b'\n', ..] => (Some(KeyInput::Enter), 2),
        [b'\r' | b'\n', ..] => (Some(KeyInput::Enter), 1),
        [DELETE | BACKSPACE, ..] => (Some(KeyInput::Backspace), 1),
        [b'\t', ..] => (Some(KeyInput::Tab), 1),
        [CTRL_C, ..] => (Some(KeyInput::Interrupt), 1),
        [0x00..=0x1f, ..] => (None, 1),
        _ => {
            let (ch, used) = utf8(input);
            (ch.map(KeyInput::Char), used)
        },
    }
}

/// Decode a control sequence following `ESC [`.
///
/// A truncated or malformed sequence consumes only the bytes that parsed.
fn csi(seq: &[u8]) -> (Option<KeyInput>, usize) {
    let params = seq.iter().take_while(|b| (0x30..=0x3f).contains(*b)).count();
    let intermediates =
        seq.iter().skip(params).take_while(|b| (0x20..=0x2f).contains(*b)).count();
    let end = params + intermediates;

    match seq.get(end) {
        Some(&last) if (0x40..=0x7e).contains(&last) => {
            let key = if last == b'~' {
                seq.get(..params).and_then(tilde_key)
            } else {
                cursor_key(last)
            };
            (key, end + 1)
        },
        _ => (None, end),
    }
}

/// `ESC [ n ~` keys, by their first parameter.
fn tilde_key(params: &[u8]) -> Option<KeyInput> {
    let first = std::str::from_utf8(params).ok()?.split(';').next()?;
    match first.parse::<u16>().ok()? {
        1 | 7 => Some(KeyInput::Home),
        4 | 8 => Some(KeyInput::End),
        _ => None,
    }
}

/// Final byte of a cursor key sequence, in either CSI or SS3 form.
fn cursor_key(last: u8) -> Option<KeyInput> {
    match last {
        b'A' => Some(KeyInput::Up),
        b'B' => Some(KeyInput::Down),
        b'C' => Some(KeyInput::Right),
        b'D' => Some(KeyInput::Left),
        b'H' => Some(KeyInput::Home),
        b'F' => Some(KeyInput::End),
        _ => None,
    }
}

/// Decode one UTF-8 character. An invalid or truncated character yields
/// `None` and spans one byte.
fn utf8(input: &[u8]) -> (Option<char>, usize) {
    let len = match input.first() {
        None => return (None, 0),
        Some(0x00..=0x7f) => 1,
        Some(0xc2..=0xdf) => 2,
        Some(0xe0..=0xef) => 3,
        Some(0xf0..=0xf4) => 4,
        Some(_) => return (None, 1),
    };

    input
        .get(..len)
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
        .and_then(|s| s.chars().next())
        .map_or((None, 1), |ch| (Some(ch), len))
}
