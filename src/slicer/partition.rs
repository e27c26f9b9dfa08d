//! Partitioning of the sorted file list into fixed-size groups, and naming of
//! the group directories from the boundary filenames of each group.

use std::ffi::OsString;
use std::ops::Range;
use tracing::debug;

use super::collect::FileLocation;
use super::names::{prefix, uniquify, NameSet};

/// Leading characters available for telling groups apart before the prefix grows.
const ALPHABET_WIDTH: usize = 26;

/// A contiguous run of the sorted file list bound for one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub start: usize,
    pub end: usize,
    /// Subdirectory name; `None` when everything goes straight into the target root.
    pub dir_name: Option<OsString>,
}

impl Group {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Number of groups needed for `total` files at `group_size` per group.
pub fn group_count(total: usize, group_size: usize) -> usize {
    total.div_ceil(group_size)
}

/// Prefix length used for directory names when there are `groups` groups.
pub fn prefix_len(groups: usize) -> usize {
    groups.div_ceil(ALPHABET_WIDTH)
}

/// Build `<start>-<end>` from the leading characters of two boundary names.
pub fn dir_name(start: &FileLocation, end: &FileLocation, prefix_len: usize) -> OsString {
    let mut name = OsString::from(prefix(&start.name, prefix_len));
    name.push("-");
    name.push(prefix(&end.name, prefix_len));
    name
}

/// Split `files` (already sorted by name) into groups of `group_size`.
///
/// With at most one group the single result carries no directory name. An
/// empty input yields one empty group. `group_size` must be at least 1.
pub fn compute_groups(files: &[FileLocation], group_size: usize) -> Vec<Group> {
    assert!(group_size > 0, "group size must be positive");

    let groups = group_count(files.len(), group_size);
    if groups <= 1 {
        return vec![Group {
            start: 0,
            end: files.len(),
            dir_name: None,
        }];
    }

    let width = prefix_len(groups);
    debug!(groups, prefix_len = width, "naming groups");

    let mut seen = NameSet::new();
    (0..groups)
        .map(|i| {
            let start = i * group_size;
            let end = (start + group_size).min(files.len());
            let candidate = dir_name(&files[start], &files[end - 1], width);
            let name = uniquify(&candidate, &seen);
            seen.insert(name.clone());
            Group {
                start,
                end,
                dir_name: Some(name),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<FileLocation> {
        list.iter().map(|n| FileLocation::new("", *n)).collect()
    }

    fn dir_names(groups: &[Group]) -> Vec<String> {
        groups
            .iter()
            .map(|g| g.dir_name.as_ref().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn thirty_files_by_ten() {
        let files: Vec<_> = (0..30)
            .map(|i| FileLocation::new("", format!("{i:02}")))
            .collect();
        let groups = compute_groups(&files, 10);
        assert_eq!(dir_names(&groups), vec!["0-0", "1-1", "2-2"]);
        assert_eq!(groups[1].range(), 10..20);
    }

    #[test]
    fn single_group_has_no_name() {
        let files = names(&["a"]);
        let groups = compute_groups(&files, 3);
        assert_eq!(
            groups,
            vec![Group {
                start: 0,
                end: 1,
                dir_name: None
            }]
        );
    }

    #[test]
    fn exactly_one_full_group_has_no_name() {
        let files = names(&["a", "b", "c"]);
        let groups = compute_groups(&files, 3);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].dir_name.is_none());
    }

    #[test]
    fn empty_input_is_one_empty_group() {
        let groups = compute_groups(&[], 5);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].is_empty());
        assert!(groups[0].dir_name.is_none());
    }

    #[test]
    fn last_group_is_short() {
        let files = names(&["a", "b", "c", "d", "e"]);
        let groups = compute_groups(&files, 3);
        assert_eq!(dir_names(&groups), vec!["a-c", "d-e"]);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[1].len(), 2);
    }

    #[test]
    fn shared_prefixes_get_suffixes() {
        let files = names(&["aa", "ab", "ac", "ad", "ae", "af"]);
        let groups = compute_groups(&files, 2);
        assert_eq!(dir_names(&groups), vec!["a-a", "a-a(1)", "a-a(2)"]);
    }

    #[test]
    fn single_file_group_repeats_prefix() {
        let files = names(&["apple", "banana", "cherry"]);
        let groups = compute_groups(&files, 2);
        assert_eq!(dir_names(&groups), vec!["a-b", "c-c"]);
    }

    #[test]
    fn prefix_grows_past_twenty_six_groups() {
        let files: Vec<_> = (0..27)
            .map(|i| FileLocation::new("", format!("f{i:02}")))
            .collect();
        let groups = compute_groups(&files, 1);
        assert_eq!(groups.len(), 27);
        assert_eq!(prefix_len(27), 2);
        // Every name is "f?-f?" or a suffixed variant, and all are distinct.
        let all = dir_names(&groups);
        assert_eq!(all[0], "f0-f0");
        assert_eq!(all[1], "f0-f0(1)");
        let unique: std::collections::HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn short_names_use_whole_name() {
        let files = names(&["a", "b", "c"]);
        let groups: Vec<_> = compute_groups(&files, 1);
        // 3 groups -> prefix length 1.
        assert_eq!(dir_names(&groups), vec!["a-a", "b-b", "c-c"]);
    }

    #[test]
    fn unicode_boundaries() {
        let files = names(&["äpfel", "öl", "über"]);
        let groups = compute_groups(&files, 2);
        assert_eq!(dir_names(&groups), vec!["ä-ö", "ü-ü"]);
    }

    #[test]
    fn groups_partition_input() {
        let files: Vec<_> = (0..103)
            .map(|i| FileLocation::new("", format!("n{i:03}")))
            .collect();
        let groups = compute_groups(&files, 10);
        assert_eq!(groups.len(), 11);
        let mut next = 0;
        for g in &groups {
            assert_eq!(g.start, next);
            assert!(g.len() >= 1 && g.len() <= 10);
            next = g.end;
        }
        assert_eq!(next, files.len());
    }

    #[test]
    fn counts() {
        assert_eq!(group_count(0, 3), 0);
        assert_eq!(group_count(1, 3), 1);
        assert_eq!(group_count(3, 3), 1);
        assert_eq!(group_count(4, 3), 2);
        assert_eq!(prefix_len(2), 1);
        assert_eq!(prefix_len(26), 1);
        assert_eq!(prefix_len(52), 2);
        assert_eq!(prefix_len(53), 3);
    }
}
