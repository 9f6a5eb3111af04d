use std::collections::HashMap;

use exprtree::interpreter::errors::{EvalError, RpnError};
use exprtree::interpreter::rpn;
use exprtree::memory::{ProbeTable, SymbolTable};
use exprtree::parser::ast::{BinOp, Node};
use exprtree::parser::parse;
use proptest::prelude::*;

const VARIABLES: [&str; 3] = ["alpha", "beta", "gamma"];

fn symbols() -> SymbolTable {
    let mut symbols = SymbolTable::new();
    symbols.add("alpha".to_string(), 3);
    symbols.add("beta".to_string(), -17);
    symbols.add("gamma".to_string(), 0);
    symbols
}

fn arithmetic_tree() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        (-50_000i32..50_000).prop_map(Node::number),
        prop::sample::select(VARIABLES.to_vec()).prop_map(Node::variable),
    ];
    leaf.prop_recursive(5, 48, 2, |inner| {
        (
            prop::sample::select(vec![
                BinOp::Add,
                BinOp::Subtract,
                BinOp::Multiply,
                BinOp::Divide,
                BinOp::Mod,
            ]),
            inner.clone(),
            inner,
        )
            .prop_map(|(op, left, right)| Node::binary(op, left, right))
    })
}

#[derive(Debug, Clone)]
enum TableOp {
    Add(String, i32),
    Remove(String),
}

fn table_op() -> impl Strategy<Value = TableOp> {
    let key = "[a-h]{1,2}";
    prop_oneof![
        3 => (key, any::<i32>()).prop_map(|(k, v)| TableOp::Add(k, v)),
        1 => key.prop_map(TableOp::Remove),
    ]
}

proptest! {
    #[test]
    fn literal_evaluates_to_itself(n in 0..=i32::MAX) {
        let tree = parse(&n.to_string()).unwrap();
        prop_assert_eq!(tree.evaluate(&mut SymbolTable::new()), Ok(n));
    }

    #[test]
    fn unassigned_identifier_is_undefined(name in "[a-z][a-z0-9]{0,8}") {
        let tree = parse(&name).unwrap();
        prop_assert_eq!(
            tree.evaluate(&mut SymbolTable::new()),
            Err(EvalError::UndefinedVariable { name: name.clone() })
        );
    }

    #[test]
    fn postfix_form_evaluates_like_the_tree(tree in arithmetic_tree()) {
        let direct = tree.evaluate(&mut symbols()).map_err(RpnError::from);
        let via_rpn = rpn::evaluate(&tree.format(), &mut symbols());
        prop_assert_eq!(via_rpn, direct);
    }

    #[test]
    fn table_matches_hash_map(ops in proptest::collection::vec(table_op(), 0..200)) {
        let mut table: ProbeTable<String, i32> = ProbeTable::with_capacity(1);
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                TableOp::Add(key, value) => {
                    prop_assert_eq!(table.add(key.clone(), value), model.insert(key, value));
                }
                TableOp::Remove(key) => {
                    prop_assert_eq!(table.remove(key.as_str()), model.remove(&key));
                    prop_assert!(!table.contains(key.as_str()));
                }
            }
            prop_assert_eq!(table.size(), model.len());
            prop_assert!(2 * table.size() <= table.capacity());
        }

        for (key, value) in &model {
            prop_assert_eq!(table.find(key.as_str()), Some(value));
        }
        prop_assert_eq!(table.iter().count(), model.len());
    }
}
