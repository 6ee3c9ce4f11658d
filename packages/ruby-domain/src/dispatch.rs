/// One entry of an ordered rule table: a predicate over normalized text and the value it builds.
pub struct Rule<T> {
	pub name: &'static str,
	pub matches: fn(&str) -> bool,
	pub build: fn(&str) -> T,
}

/// Evaluates `rules` in order and builds the value of the first rule whose predicate holds.
/// Later rules are never consulted once one matches.
pub fn first_match<T>(rules: &[Rule<T>], input: &str) -> Option<(&'static str, T)> {
	rules.iter().find(|rule| (rule.matches)(input)).map(|rule| (rule.name, (rule.build)(input)))
}
