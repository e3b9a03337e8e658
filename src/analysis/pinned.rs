use crate::models::snapshot::Repository;

/// Top non-fork repositories by stars, at most `limit`. Ties keep snapshot order.
pub fn select_pinned(repos: &[Repository], limit: usize) -> Vec<&Repository> {
    let mut candidates: Vec<&Repository> = repos.iter().filter(|r| !r.fork).collect();
    candidates.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    candidates.truncate(limit);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, stars: u64, fork: bool) -> Repository {
        Repository {
            name: name.to_string(),
            stargazers_count: stars,
            fork,
            ..Repository::default()
        }
    }

    #[test]
    fn excludes_forks() {
        let repos = vec![repo("forked", 10, true), repo("own", 5, false)];
        let pinned = select_pinned(&repos, 4);
        assert_eq!(pinned.len(), 1);
        assert_eq!(pinned[0].name, "own");
    }

    #[test]
    fn keeps_the_most_starred_up_to_the_limit() {
        let repos: Vec<Repository> = (0..8)
            .map(|i| repo(&format!("r{i}"), i, false))
            .collect();

        let four: Vec<&str> = select_pinned(&repos, 4).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(four, vec!["r7", "r6", "r5", "r4"]);
        assert_eq!(select_pinned(&repos, 6).len(), 6);
    }

    #[test]
    fn equal_stars_keep_input_order() {
        let repos = vec![repo("a", 1, false), repo("b", 1, false), repo("c", 2, false)];
        let names: Vec<&str> = select_pinned(&repos, 4).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
