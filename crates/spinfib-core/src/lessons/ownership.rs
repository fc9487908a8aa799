//! Passing by value versus passing by mutable reference.
//!
//! A function that receives a copy cannot change the caller's binding; one
//! that receives `&mut` can, and so can one that receives a mutable slice.

fn zero_by_value(mut value: i32) {
    value = 0;
    std::hint::black_box(value);
}

fn zero_by_ref(value: &mut i32) {
    *value = 0;
}

fn modify_first(words: &mut [String]) {
    if let Some(first) = words.first_mut() {
        *first = "modified".to_string();
    }
}

/// Lines printed by the ownership walkthrough.
pub fn lines() -> Vec<String> {
    let mut out = Vec::new();

    let mut i = 1;
    out.push(format!("initial: {i}"));

    zero_by_value(i);
    out.push(format!("by value: {i}"));

    zero_by_ref(&mut i);
    out.push(format!("by reference: {i}"));

    out.push(format!("address: {:p}", &i));

    let mut words = vec!["hello".to_string(), "world".to_string()];
    out.push(format!("before modification: {words:?}"));
    modify_first(&mut words);
    out.push(format!("after modification: {words:?}"));

    out
}
