use std::{ffi::OsString, io, mem};

use crate::{Error, Flags, Result};

/// Knobs for [`Flags::parse`] and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Silently drop flags that were never registered instead of failing with
    /// [`Error::UnknownFlag`].
    pub ignore_unexpected_flags: bool,
    /// Skip the first element of the argument vector, the program name.
    pub start_from_next: bool,
    /// Fail with [`Error::EmptyInput`] when there is nothing to scan.
    pub require_arguments: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { ignore_unexpected_flags: true, start_from_next: true, require_arguments: false }
    }
}

impl ParseOptions {
    /// Default options, but unknown flags are an error.
    pub fn strict() -> Self {
        ParseOptions { ignore_unexpected_flags: false, ..ParseOptions::default() }
    }
}

impl Flags {
    /// Parses `args`, updating the registered flags, and returns the index of
    /// the first positional argument (`args.len()` if there is none).
    ///
    /// A leading `-h`, `-help` or `--help` prints the usage to stdout, unless
    /// a flag with that name is registered.
    ///
    /// Values converted before an error keep their new value.
    pub fn parse<S: AsRef<str>>(&mut self, args: &[S], opts: ParseOptions) -> Result<usize> {
        self.parse_to(args, opts, &mut io::stdout())
    }

    /// Like [`Flags::parse`], but usage text goes to `out`.
    pub fn parse_to<S: AsRef<str>>(
        &mut self,
        args: &[S],
        opts: ParseOptions,
        out: &mut dyn io::Write,
    ) -> Result<usize> {
        let mut start = usize::from(opts.start_from_next).min(args.len());
        if start == args.len() && opts.require_arguments {
            return Err(Error::EmptyInput);
        }

        if let Some(name) = args.get(start).and_then(|it| help_flag(it.as_ref())) {
            if !self.contains(name) {
                tracing::trace!(index = start, "help requested");
                self.write_usage(out)?;
                start += 1;
            }
        }

        Parser::new(self, opts).run(args, start)
    }

    /// Parses the first `count` elements of `args`.
    pub fn parse_counted<S: AsRef<str>>(
        &mut self,
        count: usize,
        args: &[S],
        opts: ParseOptions,
    ) -> Result<usize> {
        match args.get(..count) {
            Some(args) => self.parse(args, opts),
            None => Err(Error::OutOfBounds { count, len: args.len() }),
        }
    }

    /// Parses an OS argument vector. Every element must be valid UTF-8.
    pub fn parse_os<I>(&mut self, args: I, opts: ParseOptions) -> Result<usize>
    where
        I: IntoIterator<Item = OsString>,
    {
        let args = args
            .into_iter()
            .enumerate()
            .map(|(index, arg)| arg.into_string().map_err(|arg| Error::InvalidUtf8 { index, arg }))
            .collect::<Result<Vec<_>>>()?;
        self.parse(&args, opts)
    }

    /// Parses the arguments of the current process.
    pub fn parse_env(&mut self, opts: ParseOptions) -> Result<usize> {
        self.parse_os(std::env::args_os(), opts)
    }

    pub fn parse_env_or_exit(&mut self, opts: ParseOptions) -> usize {
        self.parse_env(opts).unwrap_or_else(|err| err.exit())
    }
}

fn help_flag(arg: &str) -> Option<&'static str> {
    match arg {
        "-h" => Some("h"),
        "-help" | "--help" => Some("help"),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// Between flags: the next character must be a `-`.
    NewToken,
    Name,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Enter(State),
    /// Second dash of `--name`.
    SkipDash,
    PushName(char),
    PushValue(char),
    /// A flag awaiting its value was followed by another flag.
    NextFlag,
    /// Positional arguments start here.
    Tail,
}

/// One step of the tokenizer: what to do with character `c` found at position
/// `j` of the current argument while in `state`.
pub(crate) fn transition(state: State, j: usize, c: char) -> Action {
    match (state, c) {
        (State::NewToken, '-') => Action::Enter(State::Name),
        (State::NewToken, _) => Action::Tail,
        (State::Name, '-') if j == 1 => Action::SkipDash,
        (State::Name, '=') => Action::Enter(State::Value),
        (State::Name, c) => Action::PushName(c),
        (State::Value, '-') if j == 0 => Action::NextFlag,
        (State::Value, c) => Action::PushValue(c),
    }
}

struct Parser<'f> {
    flags: &'f mut Flags,
    ignore_unexpected_flags: bool,
    state: State,
    name: String,
    value: String,
    /// The value was introduced by `=` rather than by an argument boundary.
    saw_eq: bool,
}

impl<'f> Parser<'f> {
    fn new(flags: &'f mut Flags, opts: ParseOptions) -> Self {
        Parser {
            flags,
            ignore_unexpected_flags: opts.ignore_unexpected_flags,
            state: State::NewToken,
            name: String::new(),
            value: String::new(),
            saw_eq: false,
        }
    }

    fn run<S: AsRef<str>>(mut self, args: &[S], start: usize) -> Result<usize> {
        for (i, arg) in args.iter().enumerate().skip(start) {
            let arg = arg.as_ref();
            // Only `NewToken` and `Value` survive an argument boundary.
            if arg == "--" {
                self.finish();
                tracing::trace!(index = i + 1, "positional arguments start after `--`");
                return Ok(i + 1);
            }
            if arg.is_empty() && self.state == State::NewToken {
                tracing::trace!(index = i, "positional arguments start");
                return Ok(i);
            }

            for (j, c) in arg.chars().enumerate() {
                match transition(self.state, j, c) {
                    Action::Enter(state) => {
                        self.saw_eq |= state == State::Value;
                        self.state = state;
                    }
                    Action::SkipDash => (),
                    Action::PushName(c) => self.name.push(c),
                    Action::PushValue(c) => self.value.push(c),
                    Action::NextFlag => {
                        self.assume_true();
                        self.state = State::Name;
                    }
                    Action::Tail => {
                        tracing::trace!(index = i, "positional arguments start");
                        return Ok(i);
                    }
                }
            }

            self.end_of_arg(i)?;
        }
        self.finish();
        Ok(args.len())
    }

    fn end_of_arg(&mut self, index: usize) -> Result<()> {
        match self.state {
            State::NewToken => Ok(()),
            State::Name => {
                if self.name.is_empty() {
                    return Err(Error::MalformedToken { index });
                }
                if self.flags.contains(&self.name) {
                    // The value may still come in the next argument.
                    self.state = State::Value;
                    Ok(())
                } else {
                    let name = mem::take(&mut self.name);
                    self.unknown(name)
                }
            }
            State::Value => self.commit(index),
        }
    }

    fn commit(&mut self, index: usize) -> Result<()> {
        let name = mem::take(&mut self.name);
        let value = mem::take(&mut self.value);
        let saw_eq = mem::take(&mut self.saw_eq);
        self.state = State::NewToken;

        if name.is_empty() {
            return Err(Error::MalformedToken { index });
        }
        let entry = match self.flags.lookup_mut(&name) {
            Some(it) => it,
            None => return self.unknown(name),
        };
        if saw_eq && value.is_empty() {
            return Err(Error::MissingValue { name });
        }
        match entry.assign(&value) {
            Ok(()) => {
                tracing::debug!(flag = %name, value = %entry.value(), "flag set");
                Ok(())
            }
            Err(err) => Err(Error::from_literal(name, value, err)),
        }
    }

    fn unknown(&mut self, name: String) -> Result<()> {
        self.state = State::NewToken;
        if !self.ignore_unexpected_flags {
            return Err(Error::UnknownFlag { name });
        }
        tracing::trace!(flag = %name, "ignoring unknown flag");
        Ok(())
    }

    /// Handles a flag that ended without a value.
    fn assume_true(&mut self) {
        let name = mem::take(&mut self.name);
        self.value.clear();
        self.saw_eq = false;
        if let Some(entry) = self.flags.lookup_mut(&name) {
            if entry.assume_true() {
                tracing::debug!(flag = %name, "flag set without value, assuming true");
            }
        }
    }

    fn finish(&mut self) {
        match self.state {
            State::Name | State::Value => self.assume_true(),
            State::NewToken => (),
        }
        self.state = State::NewToken;
    }
}
