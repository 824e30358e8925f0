//! Ordering primitives behind the title sort.
//!
//! Titles are compared case-insensitively with digit runs ordered by numeric
//! value, so "Book 2" sorts ahead of "Book 10".

use std::cmp::Ordering;

/// Compare two titles for the catalog's title sort.
pub fn title_cmp(a: &str, b: &str) -> Ordering {
    natural_cmp(&a.to_lowercase(), &b.to_lowercase())
}

/// Natural comparison: text runs compare lexically, digit runs compare by
/// value (longer digit strings break value ties, keeping the order total).
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_tokens = tokenize(a);
    let b_tokens = tokenize(b);

    for (a_tok, b_tok) in a_tokens.iter().zip(&b_tokens) {
        let ord = match (a_tok, b_tok) {
            (Token::Number(a_digits, a_val), Token::Number(b_digits, b_val)) => {
                a_val.cmp(b_val).then_with(|| a_digits.len().cmp(&b_digits.len()))
            }
            (Token::Text(a_text), Token::Text(b_text)) => a_text.cmp(b_text),
            (Token::Number(..), Token::Text(..)) => Ordering::Less,
            (Token::Text(..), Token::Number(..)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    a_tokens.len().cmp(&b_tokens.len()).then_with(|| a.cmp(b))
}

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Text(&'a str),
    Number(&'a str, u128),
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    // Run boundaries are ASCII digits, so byte indices are valid char
    // boundaries for slicing.
    while i < bytes.len() {
        let start = i;
        if bytes[i].is_ascii_digit() {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let digits = &input[start..i];
            tokens.push(Token::Number(digits, digits.parse().unwrap_or(0)));
        } else {
            while i < bytes.len() && !bytes[i].is_ascii_digit() {
                i += 1;
            }
            tokens.push(Token::Text(&input[start..i]));
        }
    }

    tokens
}
