//! Plain-text lab reports. Lists, pairs and sets are rendered the way the recorded
//! expected files print them: `[1, 2]`, `[(1, 2), (3, 4)]`, `{1, 3}`.

use std::fmt::Display;

pub trait ReportDisplay {
    fn to_report(&self) -> String;
}

fn joined<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `[a, b, c]`
pub fn list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    format!("[{}]", joined(items))
}

/// `{a, b, c}`
pub fn set<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    format!("{{{}}}", joined(items))
}

/// `(a, b)`
pub fn pair<A: Display, B: Display>(a: A, b: B) -> String {
    format!("({}, {})", a, b)
}

/// `[(a, b), (c, d)]`
pub fn pair_list<'a, A, B, I>(pairs: I) -> String
where
    I: IntoIterator<Item = &'a (A, B)>,
    A: Display + 'a,
    B: Display + 'a,
{
    list(pairs.into_iter().map(|(a, b)| pair(a, b)))
}

/// Floats always carry a fractional part: `2.0`, `2.5`.
pub fn float(value: f64) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_collections() {
        assert_eq!(list([1, 2, 3]), "[1, 2, 3]");
        assert_eq!(list(Vec::<usize>::new()), "[]");
        assert_eq!(set([1, 3]), "{1, 3}");
        assert_eq!(pair_list(&[(1, 2), (3, 4)]), "[(1, 2), (3, 4)]");
    }

    #[test]
    fn floats_keep_a_fraction() {
        assert_eq!(float(2.0), "2.0");
        assert_eq!(float(2.5), "2.5");
        assert_eq!(float(-3.0), "-3.0");
    }
}
