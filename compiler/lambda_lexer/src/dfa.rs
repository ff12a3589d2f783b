//! Structural automaton.
//!
//! A byte-class DFA shared by every grammar. It splits the input into
//! identifier-class runs, whitespace, comments, punctuation, and runs of
//! unrecognized characters. Every state but `Start` accepts, so the
//! longest match is simply where the automaton halts.
//!
//! Bytes of a multi-byte character all fall in [`Class::Other`], so an
//! unrecognized run always ends on a character boundary.

/// Input classes the transition table is indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum Class {
    Word,
    Blank,
    Newline,
    Hash,
    LParen,
    RParen,
    Colon,
    Equals,
    Semicolon,
    Other,
}

const N_CLASSES: usize = 10;

/// Automaton states. `Halt` is the absorbing "stop here" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum S {
    Start,
    Word,
    Blank,
    Comment,
    LParen,
    RParen,
    Colon,
    Equals,
    Semicolon,
    Invalid,
    Halt,
}

const N_STATES: usize = 10;

/// What an accepted run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawTag {
    Word,
    Whitespace,
    Comment,
    LParen,
    RParen,
    Colon,
    Equals,
    Semicolon,
    Invalid,
}

/// One accepted run: its tag and byte length (always > 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: usize,
}

const fn class_of(byte: u8) -> Class {
    match byte {
        b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' => Class::Word,
        b' ' | b'\t' | b'\r' => Class::Blank,
        b'\n' => Class::Newline,
        b'#' => Class::Hash,
        b'(' => Class::LParen,
        b')' => Class::RParen,
        b':' => Class::Colon,
        b'=' => Class::Equals,
        b';' => Class::Semicolon,
        _ => Class::Other,
    }
}

static CLASSES: [Class; 256] = {
    let mut table = [Class::Other; 256];
    let mut byte = 0;
    while byte < 256 {
        table[byte] = class_of(byte as u8);
        byte += 1;
    }
    table
};

static TRANSITIONS: [[S; N_CLASSES]; N_STATES] = {
    let mut table = [[S::Halt; N_CLASSES]; N_STATES];

    let start = S::Start as usize;
    table[start][Class::Word as usize] = S::Word;
    table[start][Class::Blank as usize] = S::Blank;
    table[start][Class::Newline as usize] = S::Blank;
    table[start][Class::Hash as usize] = S::Comment;
    table[start][Class::LParen as usize] = S::LParen;
    table[start][Class::RParen as usize] = S::RParen;
    table[start][Class::Colon as usize] = S::Colon;
    table[start][Class::Equals as usize] = S::Equals;
    table[start][Class::Semicolon as usize] = S::Semicolon;
    table[start][Class::Other as usize] = S::Invalid;

    table[S::Word as usize][Class::Word as usize] = S::Word;

    table[S::Blank as usize][Class::Blank as usize] = S::Blank;
    table[S::Blank as usize][Class::Newline as usize] = S::Blank;

    // `#` runs to the end of the line, newline excluded.
    let mut class = 0;
    while class < N_CLASSES {
        table[S::Comment as usize][class] = S::Comment;
        class += 1;
    }
    table[S::Comment as usize][Class::Newline as usize] = S::Halt;

    table[S::Invalid as usize][Class::Other as usize] = S::Invalid;

    table
};

const fn accept(state: S) -> Option<RawTag> {
    match state {
        S::Word => Some(RawTag::Word),
        S::Blank => Some(RawTag::Whitespace),
        S::Comment => Some(RawTag::Comment),
        S::LParen => Some(RawTag::LParen),
        S::RParen => Some(RawTag::RParen),
        S::Colon => Some(RawTag::Colon),
        S::Equals => Some(RawTag::Equals),
        S::Semicolon => Some(RawTag::Semicolon),
        S::Invalid => Some(RawTag::Invalid),
        S::Start | S::Halt => None,
    }
}

/// Longest run starting at `pos`, or `None` at end of input.
pub fn scan(bytes: &[u8], pos: usize) -> Option<RawToken> {
    let mut state = S::Start;
    let mut end = pos;
    while let Some(&byte) = bytes.get(end) {
        let next = TRANSITIONS[state as usize][CLASSES[byte as usize] as usize];
        if next == S::Halt {
            break;
        }
        state = next;
        end += 1;
    }
    accept(state).map(|tag| RawToken {
        tag,
        len: end - pos,
    })
}
