use regex::Regex;
use std::io::{BufRead, Write};
use std::sync::OnceLock;
use tracing::debug;

use super::board::Point;
use super::error::{GameError, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    Expose(Point),
    Flag(Point)
}

impl ActionType {
    pub fn point(&self) -> Point {
        match *self {
            ActionType::Expose(point) | ActionType::Flag(point) => point
        }
    }
}

fn coordinate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z]+)([0-9]+)$").expect("coordinate pattern compiles"))
}

/// Spreadsheet-style column name: 0 is "A", 25 is "Z", 26 is "AA".
pub fn column_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        label.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    label.iter().rev().map(|&c| c as char).collect()
}

fn column_index(letters: &str) -> Option<usize> {
    letters.bytes()
        .try_fold(0usize, |acc, c| {
            let digit = (c.to_ascii_lowercase() - b'a') as usize + 1;
            acc.checked_mul(26)?.checked_add(digit)
        })
        .map(|n| n - 1)
}

/// Parses a move such as `EB12` (expose column B, row 12) or `fa3`.
/// Rows on screen start at 1; the returned point is 0-based.
pub fn parse_command(input: &str, width: usize, height: usize) -> Result<ActionType, ParseError> {
    let input = input.trim();
    let mut chars = input.chars();
    let action = match chars.next() {
        None => return Err(ParseError::Empty),
        Some(c) => c
    };
    let rest = chars.as_str();
    let cap = coordinate_regex().captures(rest)
        .ok_or_else(|| ParseError::Malformed(input.to_string()))?;

    let expose = match action.to_ascii_lowercase() {
        'e' => true,
        'f' => false,
        other => return Err(ParseError::UnknownAction(other))
    };

    let column = &cap[1];
    let x = match column_index(column) {
        Some(x) if x < width => x,
        _ => return Err(ParseError::ColumnOutOfRange(column.to_uppercase()))
    };
    let row = &cap[2];
    let y = match row.parse::<usize>() {
        Ok(y) if y >= 1 && y <= height => y - 1,
        _ => return Err(ParseError::RowOutOfRange(row.to_string()))
    };

    let point = Point(x, y);
    match expose {
        true => Ok(ActionType::Expose(point)),
        false => Ok(ActionType::Flag(point))
    }
}

pub fn usage(width: usize, height: usize) -> String {
    format!("  Moves: [E]xpose, [F]lag. Column in A-{}, row in 1-{}. Example: E{}{}",
            column_label(width.saturating_sub(1)), height,
            column_label(width / 2), (height + 1) / 2)
}

/// Prompts until a well-formed, on-board move is entered. Running out of
/// input is fatal.
pub fn read_command<R: BufRead, W: Write>(input: &mut R, output: &mut W,
                                          width: usize, height: usize) -> Result<ActionType, GameError> {
    loop {
        writeln!(output, "Pick a position to expose or flag:")?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(GameError::InputClosed)
        }
        match parse_command(&line, width, height) {
            Ok(action) => {
                debug!(?action, "parsed move");
                return Ok(action)
            }
            Err(err) => {
                writeln!(output, "{}", err)?;
                writeln!(output, "Please enter a position in the format [EF][A-Z]+[0-9]+.")?;
                writeln!(output, "{}", usage(width, height))?;
            }
        }
    }
}

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
mod interaction_tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_both_actions_in_either_case() {
        assert_eq!(parse_command("EB12", 9, 12), Ok(ActionType::Expose(Point(1, 11))));
        assert_eq!(parse_command("eb12", 9, 12), Ok(ActionType::Expose(Point(1, 11))));
        assert_eq!(parse_command("fA1\n", 9, 12), Ok(ActionType::Flag(Point(0, 0))));
        assert_eq!(parse_command("  Fi10  ", 9, 10), Ok(ActionType::Flag(Point(8, 9))));
    }

    #[test]
    fn multi_letter_columns() {
        assert_eq!(parse_command("EAA1", 30, 1), Ok(ActionType::Expose(Point(26, 0))));
        assert_eq!(parse_command("EAD3", 30, 3), Ok(ActionType::Expose(Point(29, 2))));
        assert_eq!(parse_command("EAE3", 30, 3), Err(ParseError::ColumnOutOfRange(String::from("AE"))));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_command("", 9, 9), Err(ParseError::Empty));
        assert_eq!(parse_command("   \n", 9, 9), Err(ParseError::Empty));
        assert_eq!(parse_command("XB2", 9, 9), Err(ParseError::UnknownAction('x')));
        assert_eq!(parse_command("XB99", 9, 9), Err(ParseError::UnknownAction('x')));
        assert_eq!(parse_command("qZZ0", 9, 9), Err(ParseError::UnknownAction('q')));
        assert_eq!(parse_command("E12", 9, 9), Err(ParseError::Malformed(String::from("E12"))));
        assert_eq!(parse_command("EB", 9, 9), Err(ParseError::Malformed(String::from("EB"))));
        assert_eq!(parse_command("EB2 extra", 9, 9), Err(ParseError::Malformed(String::from("EB2 extra"))));
        assert_eq!(parse_command("EB0", 9, 9), Err(ParseError::RowOutOfRange(String::from("0"))));
        assert_eq!(parse_command("EB10", 9, 9), Err(ParseError::RowOutOfRange(String::from("10"))));
        assert_eq!(parse_command("EJ1", 9, 9), Err(ParseError::ColumnOutOfRange(String::from("J"))));
        assert_eq!(parse_command("EZZZZZZZZZZZZZZZZZZ1", 9, 9),
                   Err(ParseError::ColumnOutOfRange(String::from("ZZZZZZZZZZZZZZZZZZ"))));
    }

    #[test]
    fn column_labels() {
        assert_eq!(column_label(0), "A");
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(51), "AZ");
        assert_eq!(column_label(52), "BA");
        assert_eq!(column_label(26 + 26 * 26), "AAA");
    }

    #[test]
    fn read_command_reprompts_until_valid() {
        let mut input = Cursor::new("garbage\nEZ1\nfc3\n");
        let mut output = Vec::new();
        let action = read_command(&mut input, &mut output, 4, 4).unwrap();
        assert_eq!(action, ActionType::Flag(Point(2, 2)));
        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("Pick a position").count(), 3);
        assert!(printed.contains("Column in A-D, row in 1-4"));
    }

    #[test]
    fn read_command_fails_on_eof() {
        let mut input = Cursor::new("garbage\n");
        let mut output = Vec::new();
        match read_command(&mut input, &mut output, 4, 4) {
            Err(GameError::InputClosed) => {},
            other => panic!("expected InputClosed, got {:?}", other)
        }
    }

    proptest! {
        #[test]
        fn column_label_round_trips(index in 0..100_000usize) {
            prop_assert_eq!(column_index(&column_label(index)), Some(index));
        }

        #[test]
        fn parses_every_labelled_tile(x in 0..60usize, y in 0..60usize) {
            let line = format!("f{}{}", column_label(x).to_lowercase(), y + 1);
            prop_assert_eq!(parse_command(&line, 60, 60), Ok(ActionType::Flag(Point(x, y))));
        }
    }
}
