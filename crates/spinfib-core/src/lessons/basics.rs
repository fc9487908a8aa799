//! Bindings, integer arithmetic, and a growable vector.

/// Lines printed by the basics walkthrough.
pub fn lines() -> Vec<String> {
    let mut out = vec!["hii".to_string()];

    // Integer division truncates.
    out.push((7 / 3).to_string());

    let a = "hello";
    let (b, c): (i32, i32) = (1, 2);
    out.push(format!("{a} {b} {c}"));

    let d = true;
    out.push(d.to_string());

    let mut e = String::from("hello");
    out.push(e.clone());
    e.replace_range(.., "modified e");
    out.push(e);

    let mut s = vec![String::new(); 3];
    out.push(format!("{s:?}"));

    for (slot, value) in s.iter_mut().zip(["a", "b", "c"]) {
        *slot = value.to_string();
    }
    out.push(format!("{s:?}"));

    s.push("d".to_string());
    out.push(format!("{s:?}"));

    s.extend(["e", "f"].map(String::from));
    out.push(format!("{s:?}"));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        assert_eq!(
            lines(),
            vec![
                "hii",
                "2",
                "hello 1 2",
                "true",
                "hello",
                "modified e",
                r#"["", "", ""]"#,
                r#"["a", "b", "c"]"#,
                r#"["a", "b", "c", "d"]"#,
                r#"["a", "b", "c", "d", "e", "f"]"#,
            ]
        );
    }
}
