//! Compact roll notation such as `6k3`, `7d10k4x9+2` or `5k2ue`.
//!
//! Grammar: `<rolled>[d10][k<kept>][x<threshold>][+|-<bonus>]`. The flags
//! `u` (no explode) and `e` (reroll 1s once) may appear anywhere and are
//! stripped before the numbers are read. Omitted parts default to keeping
//! every rolled die, exploding on 10, and no bonus.

use logos::Logos;

use super::D10;
use super::formula::RollFlags;
use super::pool::DicePool;
use crate::error::{EngineError, EngineResult};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
enum Token {
    #[regex("[0-9]+", |lex| lex.slice().parse::<u32>().ok())]
    Number(u32),

    #[token("d")]
    D,

    #[token("k")]
    K,

    #[token("x")]
    X,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("u")]
    NoExplode,

    #[token("e")]
    Emphasis,
}

/// A roll decoded from compact notation, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedRoll {
    /// The pool as written.
    pub pool: DicePool,
    /// Flags set by the notation.
    pub flags: RollFlags,
}

/// Parse compact roll notation.
pub fn parse(notation: &str) -> EngineResult<ParsedRoll> {
    let source = notation.trim().to_ascii_lowercase();
    let mut flags = RollFlags::default();
    let mut tokens = Vec::new();

    let mut lexer = Token::lexer(&source);
    while let Some(result) = lexer.next() {
        match result {
            Ok(Token::NoExplode) => flags.no_explode = true,
            Ok(Token::Emphasis) => flags.reroll_low_once = true,
            Ok(token) => tokens.push(token),
            Err(()) => {
                let reason = format!("unexpected {:?}", lexer.slice());
                return Err(invalid(notation, &reason));
            }
        }
    }

    let mut tokens = tokens.into_iter().peekable();

    let Some(Token::Number(roll)) = tokens.next() else {
        return Err(invalid(notation, "expected the number of rolled dice"));
    };

    if tokens.next_if_eq(&Token::D).is_some() {
        match tokens.next() {
            Some(Token::Number(D10)) => {}
            Some(Token::Number(sides)) => {
                let reason = format!("only d10 pools are supported, got d{sides}");
                return Err(invalid(notation, &reason));
            }
            _ => return Err(invalid(notation, "expected die size after 'd'")),
        }
    }

    let mut keep = roll;
    if tokens.next_if_eq(&Token::K).is_some() {
        let Some(Token::Number(kept)) = tokens.next() else {
            return Err(invalid(notation, "expected kept dice after 'k'"));
        };
        keep = kept;
    }

    if tokens.next_if_eq(&Token::X).is_some() {
        match tokens.next() {
            Some(Token::Number(threshold)) if (2..=D10).contains(&threshold) => {
                flags.explode_threshold = threshold;
            }
            Some(Token::Number(threshold)) => {
                let reason = format!("explode threshold {threshold} out of range");
                return Err(invalid(notation, &reason));
            }
            _ => return Err(invalid(notation, "expected threshold after 'x'")),
        }
    }

    let mut bonus = 0;
    if let Some(sign) = tokens.next_if(|t| matches!(t, Token::Plus | Token::Minus)) {
        let Some(Token::Number(value)) = tokens.next() else {
            return Err(invalid(notation, "expected a number after the sign"));
        };
        let value = i32::try_from(value).map_err(|_| invalid(notation, "bonus too large"))?;
        bonus = if sign == Token::Minus { -value } else { value };
    }

    if let Some(extra) = tokens.next() {
        return Err(invalid(notation, &format!("unexpected {extra:?}")));
    }

    Ok(ParsedRoll {
        pool: DicePool::new(roll, keep, bonus),
        flags,
    })
}

fn invalid(notation: &str, reason: &str) -> EngineError {
    EngineError::InvalidNotation(format!("{notation:?}: {reason}"))
}
