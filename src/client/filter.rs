//! Pure list helpers behind the search boxes on the status pages.
//! Recomputed on every keystroke, so they stay allocation-light and
//! synchronous.

use std::collections::HashMap;

/// Case-insensitive substring filter on `username`. An empty query keeps
/// the list unchanged.
pub fn filter_by_username<'a, T, F>(items: &'a [T], query: &str, username: F) -> Vec<&'a T>
where
    F: Fn(&T) -> &str,
{
    if query.is_empty() {
        return items.iter().collect();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| username(item).to_lowercase().contains(&needle))
        .collect()
}

/// Partition a filtered list by username. Groups are ordered by
/// descending size; ties keep first-seen order.
pub fn group_by_username<'a, T, F>(items: &[&'a T], username: F) -> Vec<(String, Vec<&'a T>)>
where
    F: Fn(&T) -> &str,
{
    let mut groups: Vec<(String, Vec<&'a T>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for &item in items {
        let key = username(item).to_string();
        match index.get(&key) {
            Some(&i) => groups[i].1.push(item),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![item]));
            }
        }
    }

    // sort_by_key is stable, so equal-sized groups keep first-seen order
    groups.sort_by_key(|(_, members)| std::cmp::Reverse(members.len()));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        username: &'static str,
    }

    fn rows(names: &[&'static str]) -> Vec<Row> {
        names.iter().map(|n| Row { username: n }).collect()
    }

    #[test]
    fn test_filter_is_substring_case_insensitive() {
        let list = rows(&["kimchi", "park", "KIMBAP"]);
        let hits = filter_by_username(&list, "kim", |r| r.username);
        let names: Vec<_> = hits.iter().map(|r| r.username).collect();
        assert_eq!(names, vec!["kimchi", "KIMBAP"]);
    }

    #[test]
    fn test_empty_query_returns_all() {
        let list = rows(&["kimchi", "park"]);
        assert_eq!(filter_by_username(&list, "", |r| r.username).len(), 2);
    }

    #[test]
    fn test_scenario_kim_vs_kimchi_park() {
        let list = rows(&["kimchi", "park"]);
        let hits = filter_by_username(&list, "kim", |r| r.username);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].username, "kimchi");
    }

    #[test]
    fn test_grouping_is_a_partition() {
        let list = rows(&["a", "b", "a", "c", "b", "a"]);
        let filtered = filter_by_username(&list, "", |r| r.username);
        let groups = group_by_username(&filtered, |r| r.username);

        let total: usize = groups.iter().map(|(_, m)| m.len()).sum();
        assert_eq!(total, list.len());

        let keys: Vec<_> = groups.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(groups[0].1.len(), 3);
        assert_eq!(groups[1].1.len(), 2);
    }

    #[test]
    fn test_grouping_tie_break_is_first_seen() {
        let list = rows(&["x", "y", "x", "y"]);
        let filtered = filter_by_username(&list, "", |r| r.username);
        let groups = group_by_username(&filtered, |r| r.username);
        let keys: Vec<_> = groups.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["x", "y"]);
    }
}
