//! Substring/among pre-lowering.
//!
//! `substring` and the `among (...)` that follows it share one pattern
//! table: `substring` walks it looking for the longest matching pattern,
//! and `among` dispatches on whichever one won. They are siblings in the
//! same command sequence, but not necessarily adjacent ones — other
//! commands can sit between `substring` and its `among` — so pairing a
//! `substring` walks forward over the rest of its sequence for the next
//! `among`, rather than only checking the very next command. An `among`
//! with no `substring` anywhere earlier in its sequence walks the table
//! itself.

use snowc_ast::{Command, Program, ProgramItem};
use snowc_sess::Session;

pub fn prelower_program(program: &mut Program, session: &mut Session) {
    for item in &mut program.items {
        prelower_item(item, session);
    }
}

fn prelower_item(item: &mut ProgramItem, session: &mut Session) {
    match item {
        ProgramItem::RoutineDef(def) => prelower_command(&mut def.body, session),
        ProgramItem::BackwardModeSection(items) => {
            for inner in items {
                prelower_item(inner, session);
            }
        }
        ProgramItem::StringField(_)
        | ProgramItem::IntegerField(_)
        | ProgramItem::BooleanField(_)
        | ProgramItem::External(_)
        | ProgramItem::GroupingDef(_) => {}
    }
}

/// Pairs each `Substring` with the next `Among` later in `seq` (skipping
/// over any intervening commands), then recurses into every child command
/// (including each `among` arm's command, which may contain its own nested
/// substring/among pairs).
fn prelower_sequence(seq: &mut [Command], session: &mut Session) {
    let mut i = 0;
    while i < seq.len() {
        if matches!(seq[i], Command::Substring { .. }) {
            let among_pos = seq[i + 1..]
                .iter()
                .position(|command| matches!(command, Command::Among(_)))
                .map(|offset| i + 1 + offset);

            if let Some(j) = among_pos {
                let index = session.claim_among_index();
                if let Command::Substring { table_index } = &mut seq[i] {
                    *table_index = index;
                }
                if let Command::Among(node) = &mut seq[j] {
                    node.table_index = index;
                    node.owns_walk = false;
                }
                i += 1;
                continue;
            }
            let index = session.claim_among_index();
            if let Command::Substring { table_index } = &mut seq[i] {
                *table_index = index;
            }
        }
        i += 1;
    }
    for command in seq.iter_mut() {
        prelower_command(command, session);
    }
}

fn prelower_command(command: &mut Command, session: &mut Session) {
    match command {
        Command::Not(inner)
        | Command::Test(inner)
        | Command::Try(inner)
        | Command::Do(inner)
        | Command::Fail(inner)
        | Command::GoTo(inner)
        | Command::GoPast(inner)
        | Command::Repeat(inner)
        | Command::Backwards(inner)
        | Command::Reverse(inner) => prelower_command(inner, session),

        Command::Loop(_, body) | Command::AtLeast(_, body) => prelower_command(body, session),

        Command::SetLimit { limiting, body } => {
            prelower_command(limiting, session);
            prelower_command(body, session);
        }

        Command::Concat(items) | Command::And(items) | Command::Or(items) => {
            prelower_sequence(items, session);
        }

        Command::Among(node) => {
            if node.owns_walk && node.table_index == u32::MAX {
                node.table_index = session.claim_among_index();
            }
            for arm in &mut node.arms {
                if let Some(cmd) = &mut arm.command {
                    prelower_command(cmd, session);
                }
            }
        }

        Command::Substring { table_index } if *table_index == u32::MAX => {
            *table_index = session.claim_among_index();
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowc_ast::{AmongArm, AmongNode};

    #[test]
    fn pairs_adjacent_substring_and_among() {
        let mut session = Session::new();
        let among = AmongNode {
            table_index: u32::MAX,
            owns_walk: true,
            arms: vec![AmongArm {
                patterns: vec![("ing".into(), None)],
                command: None,
            }],
        };
        let mut seq = vec![
            Command::Substring { table_index: u32::MAX },
            Command::Among(among),
        ];
        prelower_sequence(&mut seq, &mut session);
        let Command::Substring { table_index: sub_idx } = seq[0] else { panic!() };
        let Command::Among(ref node) = seq[1] else { panic!() };
        assert_eq!(sub_idx, node.table_index);
        assert!(!node.owns_walk);
    }

    #[test]
    fn pairs_substring_and_among_across_an_intervening_command() {
        let mut session = Session::new();
        let among = AmongNode {
            table_index: u32::MAX,
            owns_walk: true,
            arms: vec![AmongArm {
                patterns: vec![("ing".into(), None)],
                command: None,
            }],
        };
        let mut seq = vec![
            Command::Substring { table_index: u32::MAX },
            Command::True,
            Command::Among(among),
        ];
        prelower_sequence(&mut seq, &mut session);
        let Command::Substring { table_index: sub_idx } = seq[0] else { panic!() };
        let Command::Among(ref node) = seq[2] else { panic!() };
        assert_eq!(sub_idx, node.table_index);
        assert!(!node.owns_walk);
    }

    #[test]
    fn lone_among_claims_its_own_table_and_owns_the_walk() {
        let mut session = Session::new();
        let among = AmongNode {
            table_index: u32::MAX,
            owns_walk: true,
            arms: vec![],
        };
        let mut cmd = Command::Among(among);
        prelower_command(&mut cmd, &mut session);
        let Command::Among(node) = cmd else { panic!() };
        assert_ne!(node.table_index, u32::MAX);
        assert!(node.owns_walk);
    }

    #[test]
    fn recurses_into_among_arm_commands() {
        let mut session = Session::new();
        let inner_among = AmongNode { table_index: u32::MAX, owns_walk: true, arms: vec![] };
        let arm = AmongArm {
            patterns: vec![("x".into(), None)],
            command: Some(Box::new(Command::Among(inner_among))),
        };
        let outer = AmongNode { table_index: u32::MAX, owns_walk: true, arms: vec![arm] };
        let mut cmd = Command::Among(outer);
        prelower_command(&mut cmd, &mut session);
        let Command::Among(node) = &cmd else { panic!() };
        let Some(arm_cmd) = &node.arms[0].command else { panic!() };
        let Command::Among(inner) = arm_cmd.as_ref() else { panic!() };
        assert_ne!(inner.table_index, u32::MAX);
    }
}
