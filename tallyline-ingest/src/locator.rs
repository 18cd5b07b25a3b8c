//! Find section boundary lines.

use regex::Regex;

/// Index of the first line at or after `from` on which `marker` matches exactly once.
///
/// Lines where the marker occurs two or more times are passed over, so a heading
/// quoted inside a description does not count as a boundary.
pub fn locate<S: AsRef<str>>(lines: &[S], marker: &Regex, from: usize) -> Option<usize> {
    (from..lines.len()).find(|&i| marker.find_iter(lines[i].as_ref()).take(2).count() == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_first_qualifying_line() {
        let re = Regex::new("Checks$").unwrap();
        let lines = ["Deposits", "Checks", "Total checks", "Checks"];
        assert_eq!(locate(&lines, &re, 0), Some(1));
        assert_eq!(locate(&lines, &re, 2), Some(3));
        assert_eq!(locate(&lines, &re, 4), None);
    }

    #[test]
    fn test_locate_rejects_repeated_match() {
        let re = Regex::new("Fee").unwrap();
        let lines = ["Fee refund Fee", "Monthly Fee"];
        assert_eq!(locate(&lines, &re, 0), Some(1));
    }

    #[test]
    fn test_locate_not_found() {
        let re = Regex::new("Service fees$").unwrap();
        let lines: Vec<String> = vec!["a".into(), "b".into()];
        assert_eq!(locate(&lines, &re, 0), None);
        assert_eq!(locate(&lines, &re, 10), None);
    }
}
