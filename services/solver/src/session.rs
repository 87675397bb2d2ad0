use log::debug;

use expr::solve;

/// Connection lifecycle state
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Init,
    Active,
    Terminated,
}

/// A single inbound command line
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Hello,
    Bye,
    Solve(&'a str),
    Invalid,
}

impl<'a> Command<'a> {
    fn from_line(line: &'a str) -> Command<'a> {
        if line == "HELLO" {
            Command::Hello
        } else if line == "BYE" {
            Command::Bye
        } else if line.starts_with("SOLVE ") {
            Command::Solve(&line["SOLVE ".len()..])
        } else {
            Command::Invalid
        }
    }
}

/// A reply line to write back to the client
///
/// `Bye` is always the last thing written to a connection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reply {
    Hello,
    Result(i64),
    Bye,
}

impl Reply {
    pub fn terminates(&self) -> bool {
        matches!(self, Reply::Bye)
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Hello => write!(f, "HELLO"),
            Reply::Result(v) => write!(f, "RESULT {}", v),
            Reply::Bye => write!(f, "BYE"),
        }
    }
}

/// The per-connection state machine
///
/// Clients must open with `HELLO`, may then issue any number of successful
/// `SOLVE` commands, and end the session with `BYE`. Anything else ends the
/// session too, with a `BYE` and no further detail
pub struct Session {
    state: State,
}

impl Session {
    pub fn new() -> Session {
        Session { state: State::Init }
    }

    /// Advances the state machine by one command line
    ///
    /// Returns the reply to write, or None once the session has terminated
    pub fn handle_line(&mut self, line: &str) -> Option<Reply> {
        let (reply, next) = match (self.state, Command::from_line(line)) {
            (State::Init, Command::Hello) => (Reply::Hello, State::Active),
            (State::Init, _) => (Reply::Bye, State::Terminated),
            (State::Active, Command::Solve(input)) => match solve(input) {
                Ok(value) => (Reply::Result(value), State::Active),
                Err(e) => {
                    debug!("failed to solve {:?}: {}", input, e);
                    (Reply::Bye, State::Terminated)
                }
            },
            (State::Active, _) => (Reply::Bye, State::Terminated),
            (State::Terminated, _) => return None,
        };

        self.state = next;
        Some(reply)
    }
}
