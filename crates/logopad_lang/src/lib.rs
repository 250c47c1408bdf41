//! A tiny line-oriented turtle language.
//!
//! Every line of a script holds one command (`fd 100`, `rt 90`, `pu`, ...). There are no
//! expressions, variables or conditionals, and unknown commands are silently skipped. The one
//! looping construct is `repeat N <rest of line>`; see [`RepeatMode`] for what it does with
//! brackets.

use std::{
    collections::HashMap,
    io::{self, Stdout, Write},
};

use logopad::Turtle;

pub mod pace;
pub mod parse;

pub use pace::{NoPacing, Pacer, SleepPacing};
pub use parse::Command;

/// How `repeat` treats the rest of its line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RepeatMode {
    /// The rest of the line is run as a line of its own, brackets and all. So
    /// `repeat 4 fd 10` moves four times but `repeat 4 [ fd 10 ]` does nothing, because `[` isn't
    /// a command.
    #[default]
    Literal,
    /// `[ ... ]` holds a list of commands (possibly with nested `repeat`s). A body without
    /// brackets is run like in [`RepeatMode::Literal`].
    Bracketed,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InterpreterConfig {
    pub repeat_mode: RepeatMode,
}

/// What the caller should do after running some script.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// The script said `bye`. Nothing after it was run.
    Bye,
}

pub struct Interpreter<W = Stdout> {
    config: InterpreterConfig,
    // Procedures can be declared (with `proc name`), but there's no way to give them a body.
    procs: HashMap<String, Vec<String>>,
    // Nothing reads or writes these yet.
    vars: HashMap<String, f64>,
    pacer: Box<dyn Pacer + Send>,
    out: W,
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new(InterpreterConfig::default())
    }
}

impl Interpreter {
    /// An interpreter that prints `ppt` reports to stdout.
    pub fn new(config: InterpreterConfig) -> Self {
        Interpreter::with_output(config, io::stdout())
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(config: InterpreterConfig, out: W) -> Self {
        Interpreter {
            config,
            procs: HashMap::new(),
            vars: HashMap::new(),
            pacer: Box::new(NoPacing),
            out,
        }
    }

    pub fn set_pacer(&mut self, pacer: impl Pacer + Send + 'static) {
        self.pacer = Box::new(pacer);
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn procedures(&self) -> impl Iterator<Item = &str> {
        self.procs.keys().map(String::as_str)
    }

    pub fn variables(&self) -> &HashMap<String, f64> {
        &self.vars
    }

    /// Runs a script, one line at a time, stopping early at `bye`.
    pub fn execute(&mut self, turtle: &mut Turtle, script: &str) -> Outcome {
        for (i, line) in script.lines().enumerate() {
            log::trace!("line {}: {line:?}", i + 1);
            if self.execute_line(turtle, line) == Outcome::Bye {
                return Outcome::Bye;
            }
        }
        Outcome::Continue
    }

    /// Runs the command on a single line.
    pub fn execute_line(&mut self, turtle: &mut Turtle, line: &str) -> Outcome {
        match parse::command(line) {
            Some(cmd) => self.run(turtle, &cmd),
            None => Outcome::Continue,
        }
    }

    fn run(&mut self, turtle: &mut Turtle, cmd: &Command) -> Outcome {
        match cmd {
            Command::Forward(d) => turtle.forward(*d),
            Command::Back(d) => turtle.back(*d),
            Command::Right(a) => turtle.right(*a),
            Command::Left(a) => turtle.left(*a),
            Command::PenUp => turtle.pen_up(),
            Command::PenDown => turtle.pen_down(),
            Command::SetPenSize(w) => turtle.set_pen_size(*w),
            Command::SetPenColor(c) => turtle.set_pen_color(*c),
            Command::Home => turtle.reset(),
            Command::Clear => turtle.clear(),
            Command::Report => self.report(turtle),
            Command::Erase => {
                turtle.pen_up();
                turtle.clear();
            }
            Command::Bye => return Outcome::Bye,
            Command::Repeat { count, body } => return self.repeat(turtle, *count, body),
            Command::RepeatBlock { count, body } => {
                for _ in 0..*count {
                    for cmd in body {
                        if self.run(turtle, cmd) == Outcome::Bye {
                            return Outcome::Bye;
                        }
                    }
                }
            }
            Command::DefProc(name) => {
                self.procs.insert((*name).to_owned(), Vec::new());
            }
            Command::Call(name) => return self.call(turtle, name),
        }

        for _ in 0..cmd.steps() {
            self.pacer.step(turtle);
        }
        Outcome::Continue
    }

    fn repeat(&mut self, turtle: &mut Turtle, count: i32, body: &str) -> Outcome {
        if self.config.repeat_mode == RepeatMode::Bracketed {
            if let Ok((_, block)) = parse::block(body) {
                return self.run(turtle, &Command::RepeatBlock { count, body: block });
            }
        }

        for _ in 0..count {
            if self.execute(turtle, body) == Outcome::Bye {
                return Outcome::Bye;
            }
        }
        Outcome::Continue
    }

    fn call(&mut self, turtle: &mut Turtle, name: &str) -> Outcome {
        let Some(body) = self.procs.get(name).cloned() else {
            log::debug!("ignoring unknown command {name:?}");
            return Outcome::Continue;
        };
        for line in &body {
            if self.execute_line(turtle, line) == Outcome::Bye {
                return Outcome::Bye;
            }
        }
        Outcome::Continue
    }

    fn report(&mut self, turtle: &Turtle) {
        let pos = turtle.position();
        if let Err(e) = writeln!(
            self.out,
            "Turtle at ({},{}) angle={} penDown={}",
            pos.x,
            pos.y,
            turtle.heading(),
            u8::from(turtle.is_pen_down()),
        ) {
            log::warn!("failed to write turtle report: {e}");
        }
    }
}
