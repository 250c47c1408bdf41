//! Turning a line of script into a [`Command`].
//!
//! Arguments are read like formatted stream input: skip whitespace, take the longest prefix
//! that looks like a number, and fall back to zero when there isn't one. So
//! `fd 50abc` moves 50, `fd abc` moves 0 and `setpencolor 4.5` picks color 4.

use logopad::PenColor;
use nom::{
    bytes::complete::{take_till1, take_while},
    character::complete::{char, i32},
    combinator::{map, map_res, opt},
    multi::many0,
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded},
    IResult,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Command<'a> {
    Forward(f64),
    Back(f64),
    Right(f64),
    Left(f64),
    PenUp,
    PenDown,
    SetPenSize(f64),
    SetPenColor(PenColor),
    Home,
    Clear,
    /// Print where the turtle is.
    Report,
    /// Lift the pen and wipe the canvas.
    Erase,
    Bye,
    /// Run `body` (the rest of the line, untouched) `count` times.
    Repeat { count: i32, body: &'a str },
    /// A `repeat` whose bracketed body has already been parsed.
    RepeatBlock { count: i32, body: Vec<Command<'a>> },
    DefProc(&'a str),
    /// Anything else: maybe a procedure, maybe nothing.
    Call(&'a str),
}

impl<'a> Command<'a> {
    /// How many times this command moves or turns the turtle.
    ///
    /// `bk` counts three times: it turns around, walks forward and turns back.
    pub fn steps(&self) -> usize {
        match self {
            Command::Forward(_) | Command::Right(_) | Command::Left(_) => 1,
            Command::Back(_) => 3,
            _ => 0,
        }
    }
}

// Words and numbers skip the same whitespace, vertical tabs and form feeds included.
fn space(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_whitespace())(input)
}

/// The next whitespace-delimited word.
pub fn word(input: &str) -> IResult<&str, &str> {
    preceded(space, take_till1(|c: char| c.is_whitespace()))(input)
}

pub fn real(input: &str) -> IResult<&str, f64> {
    preceded(space, map_res(recognize_float, |s: &str| s.parse::<f64>()))(input)
}

pub fn integer(input: &str) -> IResult<&str, i32> {
    preceded(space, i32)(input)
}

fn real_or_zero(input: &str) -> f64 {
    real(input).map(|(_, x)| x).unwrap_or(0.0)
}

fn integer_or_zero(input: &str) -> i32 {
    integer(input).map(|(_, x)| x).unwrap_or(0)
}

fn color(index: i32) -> PenColor {
    // Negative indices wrap around into the packed-RGB range.
    PenColor(index as u32)
}

/// Parses a whole line. Returns `None` for a blank line.
///
/// Only the first command on a line counts; anything after its arguments is ignored, except for
/// `repeat`, which keeps the rest of the line as its body.
pub fn command(line: &str) -> Option<Command<'_>> {
    let (rest, name) = word(line).ok()?;
    Some(match name {
        "fd" => Command::Forward(real_or_zero(rest)),
        "bk" => Command::Back(real_or_zero(rest)),
        "rt" => Command::Right(real_or_zero(rest)),
        "lt" => Command::Left(real_or_zero(rest)),
        "pu" | "penup" => Command::PenUp,
        "pd" | "pendown" => Command::PenDown,
        "setpensize" => Command::SetPenSize(real_or_zero(rest)),
        "setpencolor" => Command::SetPenColor(color(integer_or_zero(rest))),
        "home" => Command::Home,
        "clear" => Command::Clear,
        "ppt" => Command::Report,
        "pe" => Command::Erase,
        "bye" => Command::Bye,
        "repeat" => match integer(rest) {
            Ok((body, count)) => Command::Repeat { count, body },
            // A stream that failed to read the count has nothing left to give.
            Err(_) => Command::Repeat { count: 0, body: "" },
        },
        "proc" => Command::DefProc(word(rest).map(|(_, name)| name).unwrap_or("")),
        name => Command::Call(name),
    })
}

// Inside brackets, words also end at a bracket so that `[fd 10]` works.
fn block_word(input: &str) -> IResult<&str, &str> {
    preceded(
        space,
        take_till1(|c: char| c.is_whitespace() || c == '[' || c == ']'),
    )(input)
}

fn open(input: &str) -> IResult<&str, char> {
    preceded(space, char('['))(input)
}

fn close(input: &str) -> IResult<&str, char> {
    preceded(space, char(']'))(input)
}

fn real_arg(input: &str) -> IResult<&str, f64> {
    map(opt(real), |x| x.unwrap_or(0.0))(input)
}

fn int_arg(input: &str) -> IResult<&str, i32> {
    map(opt(integer), |x| x.unwrap_or(0))(input)
}

fn block_command(input: &str) -> IResult<&str, Command<'_>> {
    let (rest, name) = block_word(input)?;
    match name {
        "fd" => map(real_arg, Command::Forward)(rest),
        "bk" => map(real_arg, Command::Back)(rest),
        "rt" => map(real_arg, Command::Right)(rest),
        "lt" => map(real_arg, Command::Left)(rest),
        "setpensize" => map(real_arg, Command::SetPenSize)(rest),
        "setpencolor" => map(int_arg, |c| Command::SetPenColor(color(c)))(rest),
        "repeat" => map(pair(int_arg, block), |(count, body)| Command::RepeatBlock {
            count,
            body,
        })(rest),
        "proc" => map(opt(block_word), |name| Command::DefProc(name.unwrap_or("")))(rest),
        _ => Ok((rest, command(name).unwrap_or(Command::Call(name)))),
    }
}

/// Parses a bracketed list of commands, like `[ fd 50 rt 90 ]`, all on one line.
///
/// Unlike a plain line, a block can hold any number of commands, and blocks can nest inside a
/// `repeat`.
pub fn block(input: &str) -> IResult<&str, Vec<Command<'_>>> {
    delimited(open, many0(block_command), close)(input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn commands() {
        assert_eq!(command("fd 100"), Some(Command::Forward(100.0)));
        assert_eq!(command("  bk\t-2.5  "), Some(Command::Back(-2.5)));
        assert_eq!(command("rt 90"), Some(Command::Right(90.0)));
        assert_eq!(command("lt 1e1"), Some(Command::Left(10.0)));
        assert_eq!(command("pu"), Some(Command::PenUp));
        assert_eq!(command("penup"), Some(Command::PenUp));
        assert_eq!(command("pd"), Some(Command::PenDown));
        assert_eq!(command("pendown"), Some(Command::PenDown));
        assert_eq!(command("setpensize 3"), Some(Command::SetPenSize(3.0)));
        assert_eq!(
            command("setpencolor 4"),
            Some(Command::SetPenColor(PenColor::BLUE))
        );
        assert_eq!(command("home"), Some(Command::Home));
        assert_eq!(command("clear"), Some(Command::Clear));
        assert_eq!(command("ppt"), Some(Command::Report));
        assert_eq!(command("pe"), Some(Command::Erase));
        assert_eq!(command("bye"), Some(Command::Bye));
        assert_eq!(command("proc square"), Some(Command::DefProc("square")));
        assert_eq!(command("square"), Some(Command::Call("square")));
        assert_eq!(command("FD 10"), Some(Command::Call("FD")));
        assert_eq!(command(""), None);
        assert_eq!(command("   \t"), None);
    }

    #[test]
    fn stream_style_numbers() {
        assert_eq!(command("fd 50abc"), Some(Command::Forward(50.0)));
        assert_eq!(command("fd abc"), Some(Command::Forward(0.0)));
        assert_eq!(command("fd"), Some(Command::Forward(0.0)));
        assert_eq!(command("fd inf"), Some(Command::Forward(0.0)));
        assert_eq!(command("fd 10 rt 90"), Some(Command::Forward(10.0)));
        assert_eq!(
            command("setpencolor 4.5"),
            Some(Command::SetPenColor(PenColor(4)))
        );
        assert_eq!(
            command("setpencolor -1"),
            Some(Command::SetPenColor(PenColor(u32::MAX)))
        );
        assert_eq!(
            command("setpencolor red"),
            Some(Command::SetPenColor(PenColor::BLACK))
        );
        assert_eq!(command("proc"), Some(Command::DefProc("")));
    }

    #[test]
    fn any_whitespace_separates_arguments() {
        assert_eq!(command("fd\x0b10"), Some(Command::Forward(10.0)));
        assert_eq!(command("\x0crt\x0c\x0c90"), Some(Command::Right(90.0)));
        assert_eq!(
            command("setpencolor\x0b2"),
            Some(Command::SetPenColor(PenColor::GREEN))
        );
        assert_eq!(
            command("repeat\x0b2\x0bfd 1"),
            Some(Command::Repeat {
                count: 2,
                body: "\x0bfd 1"
            })
        );
        let (_, cmds) = block("[\x0bfd\x0b5\x0b]").unwrap();
        assert_eq!(cmds, vec![Command::Forward(5.0)]);
    }

    #[test]
    fn steps() {
        assert_eq!(Command::Forward(1.0).steps(), 1);
        assert_eq!(Command::Left(1.0).steps(), 1);
        assert_eq!(Command::Back(1.0).steps(), 3);
        assert_eq!(Command::PenUp.steps(), 0);
        assert_eq!(Command::Report.steps(), 0);
    }

    #[test]
    fn repeat_keeps_the_rest_of_the_line() {
        assert_eq!(
            command("repeat 4 [ fd 50 rt 90 ]"),
            Some(Command::Repeat {
                count: 4,
                body: " [ fd 50 rt 90 ]"
            })
        );
        assert_eq!(
            command("repeat 3 fd 10"),
            Some(Command::Repeat {
                count: 3,
                body: " fd 10"
            })
        );
        assert_eq!(
            command("repeat x fd 10"),
            Some(Command::Repeat { count: 0, body: "" })
        );
    }

    #[test]
    fn blocks() {
        let (rest, cmds) = block(" [ fd 50 rt 90 ] trailing").unwrap();
        assert_eq!(rest, " trailing");
        assert_eq!(cmds, vec![Command::Forward(50.0), Command::Right(90.0)]);

        let (_, cmds) = block("[fd 10 pu repeat 2 [lt 45] pd]").unwrap();
        assert_eq!(
            cmds,
            vec![
                Command::Forward(10.0),
                Command::PenUp,
                Command::RepeatBlock {
                    count: 2,
                    body: vec![Command::Left(45.0)]
                },
                Command::PenDown,
            ]
        );

        let (_, cmds) = block("[ fd rt 90 ]").unwrap();
        assert_eq!(cmds, vec![Command::Forward(0.0), Command::Right(90.0)]);

        assert!(block("[ ]").unwrap().1.is_empty());
        assert!(block("fd 10").is_err());
        assert!(block("[ fd 10").is_err());
        assert!(block("[ [ fd 10 ] ]").is_err());
    }
}
