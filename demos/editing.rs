use ruletree::{
    NodePath, OperatorDefinition, QueryBuilderConfig, RuleDefinition, RuleSet, RuleTreeError,
};
use serde_json::json;

fn main() -> Result<(), RuleTreeError> {
    let config: QueryBuilderConfig = QueryBuilderConfig::new(
        vec![
            OperatorDefinition::new("AND", "All"),
            OperatorDefinition::new("OR", "Any"),
        ],
        vec![
            RuleDefinition::new("age", "Age").with_initial_value(json!(18)),
            RuleDefinition::new("name", "Name"),
        ],
    )
    .with_colors(["#fafafa", "#eeeeee"]);

    let mut tree: RuleSet = RuleSet::new("AND");
    let root = NodePath::root();

    let age = config.new_rule("age", 1)?;
    tree.add_rule(&root, age)?;
    let group = tree.add_group(&root, "OR")?;
    for (id, name) in [(2, "ada"), (3, "grace")] {
        let mut rule = config.new_rule("name", id)?;
        rule.value = json!(name);
        tree.add_rule(&group, rule)?;
    }
    println!("built:   {tree}");

    // Drag the age rule into the OR group, after "ada"
    tree.move_node(&NodePath::from([0]), &group, 1)?;
    println!("moved:   {tree}");

    tree.set_operator(&root, "OR")?;
    println!("flipped: {tree}");

    for (path, node) in tree.walk() {
        if let Some(g) = node.as_rule_set() {
            let color = config.color_for_depth(path.len()).unwrap_or("none");
            println!("group {path} ({}) color {color}", g.operator());
        }
    }

    match config.check_query(&tree) {
        Ok(()) => println!("tree matches the registry"),
        Err(err) => println!("registry check failed: {err}"),
    }

    Ok(())
}
