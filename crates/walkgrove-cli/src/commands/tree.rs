use clap::Subcommand;

use super::open_service;

#[derive(Subcommand)]
pub enum TreeAction {
    /// List available tree types
    Types,
    /// Show the currently growing tree
    Show,
    /// Select the growing tree's type
    Select {
        /// Tree type id (e.g. "oak", "maple")
        tree_type_id: String,
    },
}

pub fn run(action: TreeAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = open_service()?;

    match action {
        TreeAction::Types => {
            println!(
                "{}",
                serde_json::to_string_pretty(service.catalog().types())?
            );
        }
        TreeAction::Show => {
            let engine = service.engine();
            let mut shown = serde_json::to_value(engine)?;
            if let (Some(obj), Some(tree_type)) =
                (shown.as_object_mut(), service.growing_tree_type())
            {
                obj.insert("tree_type".into(), serde_json::to_value(tree_type)?);
            }
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
        TreeAction::Select { tree_type_id } => match service.select_tree_type(&tree_type_id)? {
            Some(event) => println!("{}", serde_json::to_string(&event)?),
            None => {
                eprintln!("cannot change tree type: tree is locked for today or type is unknown");
                std::process::exit(1);
            }
        },
    }
    Ok(())
}
