use crate::dialogue::{DialogueGraph, Resolvable, TERMINAL, Transition};
use std::fmt::Write;

/// Formats a graph into a human-readable listing for debugging.
///
/// Literal messages and options are shown verbatim; computed ones are marked
/// `<computed>` since they depend on the profile.
pub fn visualize_graph(graph: &DialogueGraph, name: &str) -> String {
    let mut output = String::new();
    writeln!(&mut output, "======== DIALOGUE GRAPH: {} ========", name).unwrap();
    writeln!(
        &mut output,
        "start: {}  nodes: {}  overrides: {}",
        graph.start(),
        graph.len(),
        graph.overrides().len()
    )
    .unwrap();

    if !graph.overrides().is_empty() {
        writeln!(&mut output, "\n--- OVERRIDES ---").unwrap();
        for rule in graph.overrides() {
            writeln!(
                &mut output,
                "{:<20} all{:?} any{:?} -> {}",
                rule.name, rule.all_of, rule.any_of, rule.target
            )
            .unwrap();
        }
    }

    writeln!(&mut output, "\n--- NODES ---").unwrap();
    for node in graph.nodes() {
        writeln!(&mut output, "\n[{}]", node.id).unwrap();
        match &node.message {
            Resolvable::Literal(text) => {
                writeln!(&mut output, "  say: {}", first_line(text)).unwrap()
            }
            Resolvable::Computed(_) => writeln!(&mut output, "  say: <computed>").unwrap(),
        }
        match &node.options {
            Some(Resolvable::Literal(choices)) => {
                for choice in choices {
                    writeln!(&mut output, "  [{}] {}", choice.id, choice.label).unwrap();
                }
            }
            Some(Resolvable::Computed(_)) => writeln!(&mut output, "  options: <computed>").unwrap(),
            None => writeln!(&mut output, "  options: <free text>").unwrap(),
        }
        if let Some(action) = &node.action {
            writeln!(&mut output, "  action: {:?}", action).unwrap();
        }
        match &node.next_step {
            Some(Transition::Literal(target)) => {
                writeln!(&mut output, "  {:<20} -> {}", "goto", target).unwrap()
            }
            Some(Transition::Computed(router)) => {
                for arm in router.arms() {
                    writeln!(
                        &mut output,
                        "  {:<20} -> {}",
                        format!("{:?}", arm.matcher),
                        arm.target
                    )
                    .unwrap();
                }
                writeln!(&mut output, "  {:<20} -> {}", "otherwise", router.otherwise()).unwrap();
            }
            None => writeln!(&mut output, "  {:<20} -> {}", "goto", TERMINAL).unwrap(),
        }
    }

    writeln!(&mut output, "\n================ END OF GRAPH ================").unwrap();
    output
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
