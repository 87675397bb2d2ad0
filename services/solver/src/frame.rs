use log::debug;

use expr::solve;

/// Datagram opcodes
///
/// Requests lead with `Request`, every response leads with `Response` as its
/// marker byte
#[derive(Debug, Clone, Copy, PartialEq)]
enum Opcode {
    Request = 0,
    Response = 1,
}

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Ok = 0,
    Error = 1,
}

const INVALID_OPCODE: &str = "Invalid opcode";
const INVALID_LENGTH: &str = "Invalid length";
const EVAL_FAILED: &str = "Error evaluating expression";

/// Handles a single request datagram, producing the response datagram
///
/// Requests are `[opcode][length][payload]` with the payload carrying the
/// expression text, responses are `[marker][status][length][message]`.
/// Stateless - datagrams have no relationship to one another
pub fn handle(datagram: &[u8]) -> Vec<u8> {
    if datagram.len() < 2 {
        return encode(Status::Error, INVALID_LENGTH);
    }

    if datagram[0] != Opcode::Request as u8 {
        return encode(Status::Error, INVALID_OPCODE);
    }

    let payload = &datagram[2..];
    if payload.len() != datagram[1] as usize {
        return encode(Status::Error, INVALID_LENGTH);
    }

    let input = match std::str::from_utf8(payload) {
        Ok(input) => input,
        Err(_) => return encode(Status::Error, EVAL_FAILED),
    };

    match solve(input) {
        Ok(value) => encode(Status::Ok, &value.to_string()),
        Err(e) => {
            debug!("failed to solve {:?}: {}", input, e);
            encode(Status::Error, EVAL_FAILED)
        }
    }
}

fn encode(status: Status, message: &str) -> Vec<u8> {
    let mut response = Vec::with_capacity(3 + message.len());
    response.push(Opcode::Response as u8);
    response.push(status as u8);
    response.push(message.len() as u8);
    response.extend_from_slice(message.as_bytes());
    response
}
