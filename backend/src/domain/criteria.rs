//! Driver search query tokenizer.
//!
//! A query is a comma separated list of `key<op>value` terms where `<op>` is
//! one of `:`, `<` or `>`. Scanning works on the query with a synthetic
//! trailing comma so the last term is terminated like every other one. A term
//! is the shortest non-empty key followed by an operator, then the shortest
//! non-empty value that is followed by a comma. Text that never forms a term
//! is skipped, and when a key repeats only its last occurrence is kept.

use std::fmt;

/// Comparison operator of a [`Criterion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `:`
    Eq,
    /// `<`
    Lt,
    /// `>`
    Gt,
}

impl Operator {
    /// Operator for a separator character, if it is one.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            ':' => Some(Self::Eq),
            '<' => Some(Self::Lt),
            '>' => Some(Self::Gt),
            _ => None,
        }
    }

    /// Separator character for this operator.
    pub const fn as_char(self) -> char {
        match self {
            Self::Eq => ':',
            Self::Lt => '<',
            Self::Gt => '>',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One parsed `(key, operator, value)` instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    key: String,
    operator: Operator,
    value: String,
}

impl Criterion {
    /// Build a criterion from its parts.
    pub fn new(key: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operator,
            value: value.into(),
        }
    }

    /// Dotted attribute path, as written.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Comparison operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The raw value; each filter interprets it.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, self.operator, self.value)
    }
}

/// Parsed criteria with unique keys, kept in the order their final
/// occurrence was seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    items: Vec<Criterion>,
}

impl Criteria {
    /// Tokenize `query`. Parsing never fails; unmatched text is dropped.
    ///
    /// # Examples
    /// ```
    /// use fleet_backend::domain::{Criteria, Operator};
    ///
    /// let criteria = Criteria::parse("car.rating>3,car.seatCount>1,car.rating<5");
    /// assert_eq!(criteria.len(), 2);
    /// let rating = criteria.get("car.rating").expect("present");
    /// assert_eq!(rating.operator(), Operator::Lt);
    /// assert_eq!(rating.value(), "5");
    /// ```
    pub fn parse(query: &str) -> Self {
        let mut criteria = Self::default();
        for criterion in Scanner::new(query) {
            criteria.insert(criterion);
        }
        criteria
    }

    /// Insert `criterion`, replacing any earlier entry with the same key.
    pub fn insert(&mut self, criterion: Criterion) {
        self.items.retain(|existing| existing.key != criterion.key);
        self.items.push(criterion);
    }

    /// Criterion stored for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Criterion> {
        self.items.iter().find(|criterion| criterion.key == key)
    }

    /// Criteria in insertion order. A replaced key moves to the end.
    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.items.iter()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no term was recognised.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

const TERM_SEPARATOR: char = ',';

/// Keys and values never span a line break.
fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

/// Iterator over the terms of a query.
struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(query: &str) -> Self {
        let mut chars: Vec<char> = query.chars().collect();
        chars.push(TERM_SEPARATOR);
        Self { chars, pos: 0 }
    }

    /// Index of the first separator at or after `from`, unless a line break
    /// comes first.
    fn separator_from(&self, from: usize) -> Option<usize> {
        self.chars
            .get(from..)?
            .iter()
            .position(|&c| c == TERM_SEPARATOR || is_line_terminator(c))
            .map(|offset| from + offset)
            .filter(|&index| self.chars[index] == TERM_SEPARATOR)
    }

    /// Try to read a term whose key starts at `start`. Returns the criterion
    /// and the index just past its separator.
    fn term_at(&self, start: usize) -> Option<(Criterion, usize)> {
        // The key holds at least one character, so the operator is looked
        // for from `start + 1`.
        let mut op_index = start + 1;
        while let Some(&c) = self.chars.get(op_index) {
            if is_line_terminator(self.chars[op_index - 1]) {
                return None;
            }
            let matched = Operator::from_char(c)
                .and_then(|operator| Some((operator, self.value_end(op_index)?)));
            if let Some((operator, end)) = matched {
                let key: String = self.chars[start..op_index].iter().collect();
                let value: String = self.chars[op_index + 1..end].iter().collect();
                return Some((Criterion::new(key, operator, value), end + 1));
            }
            op_index += 1;
        }
        None
    }

    /// Index of the separator ending a value that follows the operator at
    /// `op_index`. The value holds at least one character.
    fn value_end(&self, op_index: usize) -> Option<usize> {
        let first = *self.chars.get(op_index + 1)?;
        if is_line_terminator(first) {
            return None;
        }
        self.separator_from(op_index + 2)
    }
}

impl Iterator for Scanner {
    type Item = Criterion;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.chars.len() {
            if let Some((criterion, next)) = self.term_at(self.pos) {
                self.pos = next;
                return Some(criterion);
            }
            // A start that cannot form a term poisons every later start on
            // the same line; resume after the next line break.
            let rest = self.chars.get(self.pos..)?;
            let skip = rest.iter().position(|&c| is_line_terminator(c))?;
            self.pos += skip + 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn triples(query: &str) -> Vec<(String, char, String)> {
        Criteria::parse(query)
            .iter()
            .map(|c| (c.key().to_owned(), c.operator().as_char(), c.value().to_owned()))
            .collect()
    }

    fn triple(key: &str, op: char, value: &str) -> (String, char, String) {
        (key.to_owned(), op, value.to_owned())
    }

    #[rstest]
    #[case(
        "car.rating:4,car.seatCount:2",
        vec![triple("car.rating", ':', "4"), triple("car.seatCount", ':', "2")]
    )]
    #[case(
        "car.rating<4,car.seatCount<5",
        vec![triple("car.rating", '<', "4"), triple("car.seatCount", '<', "5")]
    )]
    #[case(
        "onlineStatus:ONLINE,username:admin,coordinate:10^10",
        vec![
            triple("onlineStatus", ':', "ONLINE"),
            triple("username", ':', "admin"),
            triple("coordinate", ':', "10^10"),
        ]
    )]
    #[case("car.engineType:GAS", vec![triple("car.engineType", ':', "GAS")])]
    fn parses_documented_queries(#[case] query: &str, #[case] expected: Vec<(String, char, String)>) {
        assert_eq!(triples(query), expected);
    }

    #[rstest]
    #[case("")]
    #[case(",")]
    #[case("car.rating")]
    #[case(":4")]
    #[case("car.rating:")]
    fn yields_nothing_for_incomplete_terms(#[case] query: &str) {
        assert!(Criteria::parse(query).is_empty());
    }

    #[test]
    fn last_duplicate_key_wins() {
        assert_eq!(
            triples("car.rating>3,car.seatCount>1,car.rating<5"),
            vec![triple("car.seatCount", '>', "1"), triple("car.rating", '<', "5")]
        );
    }

    #[test]
    fn keep_unrecognized_keys() {
        assert_eq!(
            triples("colour:red,username:bob"),
            vec![triple("colour", ':', "red"), triple("username", ':', "bob")]
        );
    }

    #[test]
    fn leading_garbage_is_absorbed_into_key() {
        assert_eq!(
            triples("foo,car.rating>3"),
            vec![triple("foo,car.rating", '>', "3")]
        );
    }

    #[test]
    fn value_stops_at_first_separator() {
        assert_eq!(
            triples("username:a:b,car.id:1"),
            vec![triple("username", ':', "a:b"), triple("car.id", ':', "1")]
        );
    }

    #[test]
    fn empty_value_swallows_next_term() {
        assert_eq!(triples("a:,b:c"), vec![triple("a", ':', ",b:c")]);
    }

    #[test]
    fn operator_is_first_candidate_after_key_start() {
        // The key cannot be empty, so a leading operator belongs to the key.
        assert_eq!(triples("<<1"), vec![triple("<", '<', "1")]);
    }

    #[test]
    fn line_breaks_end_candidate_terms() {
        assert_eq!(
            triples("user\nname:bob"),
            vec![triple("name", ':', "bob")]
        );
        assert!(Criteria::parse("username:bo\nb").is_empty());
    }

    #[test]
    fn separator_can_be_a_value() {
        assert_eq!(triples("car.rating:,"), vec![triple("car.rating", ':', ",")]);
    }

    #[test]
    fn values_are_not_trimmed() {
        assert_eq!(triples("username: bob "), vec![triple("username", ':', " bob ")]);
    }
}
