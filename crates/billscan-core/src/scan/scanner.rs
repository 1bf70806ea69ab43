//! Cursor-driven scanner over the lines of a rendered document.
//!
//! The scanner walks forward only. A header pass consumes lines until every header pattern
//! has matched, and the item pass continues from where the header pass stopped.

use tracing::{debug, trace};

use super::{Fields, Pattern};
use crate::error::ParseError;

/// How line items are laid out in the item block of a document.
#[derive(Debug, Clone, Copy)]
pub enum ItemLayout<'p> {
    /// One item is spread over several physical lines, matched in a fixed cycle.
    /// Unmatched lines are noise.
    Grouped(&'p [Pattern]),
    /// One physical line holds one item. Blank lines are skipped, any other unmatched
    /// line is an error.
    SingleLine(&'p Pattern),
}

/// Forward-only cursor over document lines.
#[derive(Debug)]
pub struct LineScanner<'a> {
    lines: &'a [String],
    position: usize,
}

impl<'a> LineScanner<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        Self { lines, position: 0 }
    }

    /// Number of lines consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.lines.len() - self.position
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.position)?;
        self.position += 1;
        Some(line.as_str())
    }

    /// Match each pattern once, in order, skipping any lines in between.
    pub fn sequential(&mut self, patterns: &[Pattern]) -> Result<Fields, ParseError> {
        let mut fields = Fields::new();

        for pattern in patterns {
            loop {
                let Some(line) = self.next_line() else {
                    return Err(ParseError::HeaderNotMatched {
                        pattern: pattern.to_string(),
                    });
                };

                if let Some(caps) = pattern.captures(line) {
                    debug!("Header pattern '{}' matched at line {}", pattern.name(), self.position);
                    fields.merge(pattern, &caps);
                    break;
                }
                trace!("Header noise: {:?}", line);
            }
        }

        Ok(fields)
    }

    /// Cycle through `group`, emitting one item per full cycle.
    ///
    /// The stop pattern is tested only when the active group pattern misses, so a line that
    /// satisfies both is consumed as item data. A partially filled item is dropped on stop.
    pub fn cyclic_grouped(
        &mut self,
        group: &[Pattern],
        stop: &Pattern,
    ) -> Result<Vec<Fields>, ParseError> {
        let mut items = Vec::new();
        let mut buffer = Fields::new();
        let mut index = 0;

        while let Some(line) = self.next_line() {
            let matched = group
                .get(index)
                .and_then(|pattern| pattern.captures(line).map(|caps| (pattern, caps)));

            if let Some((pattern, caps)) = matched {
                buffer.merge(pattern, &caps);
                index += 1;
                if index == group.len() {
                    debug!("Line item {} complete at line {}", items.len() + 1, self.position);
                    items.push(std::mem::take(&mut buffer));
                    index = 0;
                }
            } else if stop.is_match(line) {
                if !buffer.is_empty() {
                    debug!("Discarding incomplete line item at stop line {}", self.position);
                }
                debug!("Stop pattern matched at line {}", self.position);
                return Ok(items);
            } else {
                trace!("Item noise: {:?}", line);
            }
        }

        Err(ParseError::StopNotFound {
            stop: stop.to_string(),
        })
    }

    /// Match one item per non-blank line until the stop pattern.
    pub fn single_line_strict(
        &mut self,
        item: &Pattern,
        stop: &Pattern,
    ) -> Result<Vec<Fields>, ParseError> {
        let mut items = Vec::new();

        while let Some(line) = self.next_line() {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(caps) = item.captures(line) {
                let mut fields = Fields::new();
                fields.merge(item, &caps);
                debug!("Line item {} matched at line {}", items.len() + 1, self.position);
                items.push(fields);
            } else if stop.is_match(line) {
                debug!("Stop pattern matched at line {}", self.position);
                return Ok(items);
            } else {
                return Err(ParseError::UnexpectedLine {
                    line: line.to_string(),
                });
            }
        }

        Err(ParseError::StopNotFound {
            stop: stop.to_string(),
        })
    }

    /// Run the item pass for `layout`.
    pub fn items(&mut self, layout: ItemLayout<'_>, stop: &Pattern) -> Result<Vec<Fields>, ParseError> {
        match layout {
            ItemLayout::Grouped(group) => self.cyclic_grouped(group, stop),
            ItemLayout::SingleLine(item) => self.single_line_strict(item, stop),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use regex::Regex;

    fn pattern(name: &'static str, source: &str) -> Pattern {
        Pattern::new(name, Regex::new(source).unwrap())
    }

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    fn group() -> Vec<Pattern> {
        vec![
            pattern("row", r"^ROW (?P<id>\d+)"),
            pattern("price", r"^\s+PRICE (?P<price>\d+)"),
            pattern("mail", r"^\s+MAIL (?P<mail>\S+@\S+)"),
        ]
    }

    #[test]
    fn test_sequential_skips_noise() {
        let patterns = vec![
            pattern("number", r"No\. (?P<number>\d+)"),
            pattern("date", r"Date: (?P<date>\S+)"),
        ];
        let doc = lines("Title\nNo. 17\nnoise\n\nDate: 2024-01-02\nrest");
        let mut scanner = LineScanner::new(&doc);

        let fields = scanner.sequential(&patterns).unwrap();
        assert_eq!(fields.get("number"), Some("17"));
        assert_eq!(fields.get("date"), Some("2024-01-02"));
        assert_eq!(scanner.position(), 5);
        assert_eq!(scanner.remaining(), 1);
    }

    #[test]
    fn test_sequential_does_not_backtrack() {
        let patterns = vec![
            pattern("date", r"Date: (?P<date>\S+)"),
            pattern("number", r"No\. (?P<number>\d+)"),
        ];
        let doc = lines("No. 17\nDate: 2024-01-02");
        let err = LineScanner::new(&doc).sequential(&patterns).unwrap_err();
        assert_eq!(
            err,
            ParseError::HeaderNotMatched {
                pattern: r"number /No\. (?P<number>\d+)/".to_string()
            }
        );
    }

    #[test]
    fn test_sequential_first_value_wins() {
        let patterns = vec![
            pattern("a", r"a=(?P<v>\d)"),
            pattern("b", r"b=(?P<v>\d)"),
        ];
        let doc = lines("a=1\nb=2");
        let fields = LineScanner::new(&doc).sequential(&patterns).unwrap();
        assert_eq!(fields.get("v"), Some("1"));
    }

    #[test]
    fn test_cyclic_grouped_items() {
        let doc = lines(
            "ROW 1\n  PRICE 10\nnoise\n  MAIL a@x.cz\nROW 2\n\n  PRICE 20\n  MAIL b@x.cz\nEND\nROW 3",
        );
        let stop = pattern("stop", r"^END");
        let mut scanner = LineScanner::new(&doc);

        let items = scanner.cyclic_grouped(&group(), &stop).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].get("id"), Some("1"));
        assert_eq!(items[0].get("mail"), Some("a@x.cz"));
        assert_eq!(items[1].get("price"), Some("20"));
        assert_eq!(scanner.position(), 9);
    }

    #[test]
    fn test_cyclic_grouped_discards_partial_item_on_stop() {
        let doc = lines("ROW 1\n  PRICE 10\n  MAIL a@x.cz\nROW 2\n  PRICE 20\nnoise\nEND\n  MAIL b@x.cz");
        let stop = pattern("stop", r"^END");

        let items = LineScanner::new(&doc).cyclic_grouped(&group(), &stop).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].get("id"), Some("1"));
    }

    #[test]
    fn test_cyclic_grouped_stop_checked_only_on_miss() {
        // "ROW 9 END" satisfies both the active pattern and the stop pattern.
        let doc = lines("ROW 9 END\n  PRICE 5\n  MAIL c@x.cz\nEND");
        let stop = pattern("stop", r"END");

        let items = LineScanner::new(&doc).cyclic_grouped(&group(), &stop).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].get("id"), Some("9"));
    }

    #[test]
    fn test_cyclic_grouped_requires_stop() {
        let doc = lines("ROW 1\n  PRICE 10\n  MAIL a@x.cz");
        let stop = pattern("stop", r"^END");
        let err = LineScanner::new(&doc).cyclic_grouped(&group(), &stop).unwrap_err();
        assert!(matches!(err, ParseError::StopNotFound { .. }));
    }

    #[test]
    fn test_single_line_strict_items() {
        let item = pattern("item", r"^(?P<name>\w+)\s+(?P<qty>\d+)$");
        let stop = pattern("stop", r"^TOTAL");
        let doc = lines("apple 2\n\n   \npear 5\nTOTAL: 7\ntrailing");
        let mut scanner = LineScanner::new(&doc);

        let items = scanner.items(ItemLayout::SingleLine(&item), &stop).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].get("name"), Some("pear"));
        assert_eq!(scanner.remaining(), 1);
    }

    #[test]
    fn test_single_line_strict_rejects_unknown_line() {
        let item = pattern("item", r"^(?P<name>\w+)\s+(?P<qty>\d+)$");
        let stop = pattern("stop", r"^TOTAL");
        let doc = lines("apple 2\n-- page 2 --\npear 5\nTOTAL: 7");

        let err = LineScanner::new(&doc).single_line_strict(&item, &stop).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedLine {
                line: "-- page 2 --".to_string()
            }
        );
    }

    #[test]
    fn test_single_line_strict_requires_stop() {
        let item = pattern("item", r"^(?P<name>\w+)\s+(?P<qty>\d+)$");
        let stop = pattern("stop", r"^TOTAL");
        let doc = lines("apple 2");
        let err = LineScanner::new(&doc).single_line_strict(&item, &stop).unwrap_err();
        assert!(matches!(err, ParseError::StopNotFound { .. }));
    }

    #[test]
    fn test_item_pass_continues_after_header() {
        let header = vec![pattern("caption", r"^Items$")];
        let item = pattern("item", r"^(?P<name>\w+)\s+(?P<qty>\d+)$");
        let stop = pattern("stop", r"^TOTAL");
        // The item-like line before the caption belongs to the header noise.
        let doc = lines("early 1\nItems\nlate 2\nTOTAL");
        let mut scanner = LineScanner::new(&doc);

        scanner.sequential(&header).unwrap();
        let items = scanner.items(ItemLayout::SingleLine(&item), &stop).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].get("name"), Some("late"));
    }
}
