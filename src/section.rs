//! Line-based section isolation.
//!
//! Resumes rarely have machine-readable structure, so a "section" here is
//! everything from the first line mentioning one of the target headings up
//! to the first blank line or the first line mentioning another section's
//! heading.

/// Return the lower-cased body of the first section whose heading line
/// contains one of `target` (case-insensitive substring).
///
/// Text following the marker on the heading line itself is part of the
/// body, so `Skills: Python, SQL` yields `python, sql`. An empty string
/// means the heading was never found.
pub fn section_body(text: &str, target: &[String], other: &[String]) -> String {
    let target = lowered(target);
    let other = lowered(other);

    let mut body = String::new();
    let mut lines = text.lines();

    loop {
        let Some(line) = lines.next() else {
            return body;
        };
        let lower = line.to_lowercase();
        if let Some(end) = heading_end(&lower, &target) {
            let rest = lower[end..].trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace());
            let rest = rest.trim_end();
            if !rest.is_empty() {
                body.push_str(rest);
                body.push(' ');
            }
            break;
        }
    }

    for line in lines {
        if line.trim().is_empty() {
            break;
        }
        let lower = line.to_lowercase();
        if other.iter().any(|m| lower.contains(m.as_str())) {
            break;
        }
        body.push_str(lower.trim());
        body.push(' ');
    }

    body
}

/// Byte offset just past the furthest-reaching marker on the line.
fn heading_end(line: &str, markers: &[String]) -> Option<usize> {
    markers
        .iter()
        .filter_map(|m| line.find(m.as_str()).map(|start| start + m.len()))
        .max()
}

fn lowered(markers: &[String]) -> Vec<String> {
    markers
        .iter()
        .map(|m| m.trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn body_runs_until_next_heading() {
        let text = "Jane\nEDUCATION\nB.Tech Computer Science\nIIT Delhi\nProjects\nMasters of Puppets";
        let body = section_body(text, &markers(&["education"]), &markers(&["projects"]));
        assert_eq!(body, "b.tech computer science iit delhi ");
    }

    #[test]
    fn body_runs_until_blank_line() {
        let text = "Skills\nPython\nRust\n\nDocker";
        let body = section_body(text, &markers(&["skills"]), &[]);
        assert_eq!(body, "python rust ");
    }

    #[test]
    fn inline_heading_contributes_its_tail() {
        let text = "Skills: Python, SQL\nEducation: BTech";
        let skills = section_body(text, &markers(&["skills"]), &markers(&["education"]));
        assert_eq!(skills, "python, sql ");
        let education = section_body(text, &markers(&["education"]), &markers(&["skills"]));
        assert_eq!(education, "btech ");
    }

    #[test]
    fn missing_heading_gives_empty_body() {
        let text = "Python developer\nDocker, AWS";
        assert_eq!(section_body(text, &markers(&["skills"]), &[]), "");
    }

    #[test]
    fn only_first_section_is_used() {
        let text = "Skills\nPython\n\nSkills\nJava";
        assert_eq!(section_body(text, &markers(&["skills"]), &[]), "python ");
    }

    #[test]
    fn blank_markers_are_ignored() {
        let text = "Python\nSkills\nSQL";
        assert_eq!(section_body(text, &markers(&["", "skills"]), &markers(&[" "])), "sql ");
    }
}
