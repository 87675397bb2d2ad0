use nom::IResult;
use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1},
    combinator::{map, map_res, opt, recognize},
    multi::fold_many0,
    sequence::{pair, preceded},
};

use super::{Expr, Op};

// Only the space character separates tokens, other whitespace is invalid
fn spaces(i: &str) -> IResult<&str, &str> {
    take_while(|c| c == ' ')(i)
}

fn separator(i: &str) -> IResult<&str, &str> {
    take_while1(|c| c == ' ')(i)
}

fn parse_integer(i: &str) -> IResult<&str, Expr> {
    map_res(
        recognize(pair(opt(char('-')), digit1)),
        |digit_str: &str| digit_str.parse().map(Expr::Constant),
    )(i)
}

fn parse_operator(i: &str) -> IResult<&str, Op> {
    alt((
        map(char('+'), |_| Op::Add),
        map(char('-'), |_| Op::Sub),
        map(char('*'), |_| Op::Mul),
        map(char('/'), |_| Op::Div),
    ))(i)
}

fn parse_application(i: &str) -> IResult<&str, Expr> {
    let (i, _) = char('(')(i)?;
    let (i, op) = preceded(spaces, parse_operator)(i)?;
    let (i, first) = preceded(separator, parse_expression)(i)?;
    let (i, second) = preceded(separator, parse_expression)(i)?;

    // Additional operands accumulate iteratively, only nesting recurses
    let (i, rest) = fold_many0(
        preceded(separator, parse_expression),
        vec![second],
        |mut operands, operand| {
            operands.push(operand);
            operands
        },
    )(i)?;
    let (i, _) = preceded(spaces, char(')'))(i)?;

    Ok((i, Expr::Application(op, Box::new(first), rest)))
}

fn parse_expression(i: &str) -> IResult<&str, Expr> {
    alt((parse_integer, parse_application))(i)
}

#[derive(Debug, Clone)]
pub struct ParseError(pub String);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParseError: {}", self.0)
    }
}

impl std::error::Error for ParseError {}

pub fn parse(i: &str) -> Result<Expr, ParseError> {
    match parse_expression(i) {
        Ok((remaining, r)) => {
            if remaining != "" {
                return Err(ParseError(format!("Unexpected token at \"{}\"", remaining)));
            }
            Ok(r)
        }
        Err(nom::Err::Error((i, _))) | Err(nom::Err::Failure((i, _))) => {
            Err(ParseError(format!("Unexpected token at \"{}\"", i)))
        }
        Err(_) => Err(ParseError("Parse Error".to_string())),
    }
}
