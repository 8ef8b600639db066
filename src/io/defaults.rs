/*!
Datasets of default rules.

A dataset is read line by line, with each (trimmed) line containing the [separator](RULE_SEPARATOR) read as a [default rule](DefaultRule).
- A line without the separator is skipped.
- A line with more than one separator, or with an antecedent or consequent which fails to parse, is skipped with a warning.
- A line beginning with the separator has an empty antecedent.

```rust
# use tweety::io::defaults::read_default_rules;
let dataset = "\
bird(tweety) -> flies(tweety)
penguin(tweety) -> !flies(tweety)
a note without a rule
-> !penguin(tweety)
broken( -> flies(tweety)
";

let rules = read_default_rules(dataset.as_bytes()).unwrap();
assert_eq!(rules.len(), 3);
assert!(rules[2].antecedent().is_empty());
```
*/

use std::io::BufRead;

use crate::{
    misc::log::targets,
    structures::default_rule::{DefaultRule, RULE_SEPARATOR},
    types::err::{self, ErrorKind},
};

/// The default rules of a dataset, in order of appearance.
///
/// An error is returned only if reading fails, with the line at which reading failed.
pub fn read_default_rules(mut reader: impl BufRead) -> Result<Vec<DefaultRule>, ErrorKind> {
    let mut rules = Vec::default();
    let mut buffer = String::with_capacity(1024);
    let mut line_counter = 0;
    let mut skipped = 0;

    loop {
        buffer.clear();
        match reader.read_line(&mut buffer) {
            Ok(0) => break,
            Ok(_) => line_counter += 1,
            Err(_) => return Err(ErrorKind::from(err::ParseError::Line(line_counter))),
        }

        let line = buffer.trim();
        match line.matches(RULE_SEPARATOR).count() {
            0 => continue,

            1 => match line.parse::<DefaultRule>() {
                Ok(rule) => rules.push(rule),
                Err(e) => {
                    log::warn!(target: targets::DATASET, "Line {line_counter} skipped: {e:?}");
                    skipped += 1;
                }
            },

            _ => {
                log::warn!(target: targets::DATASET, "Line {line_counter} skipped: more than one {RULE_SEPARATOR}");
                skipped += 1;
            }
        }
    }

    log::info!(target: targets::DATASET, "Read {} rules from {line_counter} lines, skipped {skipped}", rules.len());
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_lines() {
        let dataset = "a -> b -> c\n\n  x, y -> !z  \nq ->\n";
        let rules = read_default_rules(dataset.as_bytes()).unwrap();
        assert_eq!(rules, vec!["x, y -> !z".parse().unwrap()]);
    }
}
