// src/cli/brief.rs — Print the instructions built from the loaded context

use crate::persona::PersonaBrief;

pub fn run_brief(brief: &PersonaBrief, evaluator: bool) {
    let text = if evaluator {
        brief.evaluator()
    } else {
        brief.responder()
    };
    println!("{}", text);
}
