//! Example: Load a USDA file and inspect it through the bridge layer.
//!
//! Run with: cargo run --example inspect_stage -- path/to/scene.usda
//!
//! With no argument, a small built-in stage is inspected instead.

use std::env;

use anyhow::Result;
use prism_core::bridge::{Object3dHandler, SceneItem};
use prism_core::stage::Stage;

const DEMO_STAGE: &str = r#"#usda 1.0
def Xform "World"
{
    def Cube "Cube"
    {
        float3[] extent = [(-0.5, -0.5, -0.5), (0.5, 0.5, 0.5)]
        double3 xformOp:translate = (2, 0, 0)
    }

    def Sphere "Hidden"
    {
        float3[] extent = [(-1, -1, -1), (1, 1, 1)]
        token visibility = "invisible"
    }

    def Material "Red"
    {
        string info = "materials have no 3d object interface"
    }
}
"#;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let stage = if args.len() < 2 {
        println!("No file given, inspecting the built-in demo stage.");
        println!("Usage: inspect_stage <path-to-usda-file>\n");
        Stage::from_usda_str(DEMO_STAGE, "demo")?
    } else {
        Stage::load_usda(&args[1])?
    };

    println!("=== Stage: {} ===", stage.name());

    let handler = Object3dHandler::with_default_time();
    for prim in stage.traverse() {
        let item = SceneItem::from_prim(&prim);
        println!("\n{} <{}>", item.path(), item.node_type());

        let obj = match handler.object3d(&item) {
            Some(obj) => obj,
            None => {
                println!("  (not imageable)");
                continue;
            }
        };

        println!("  visible: {}", obj.visibility()?);

        let bbox = obj.bounding_box();
        if bbox.is_empty() {
            println!("  bounds: (empty)");
        } else {
            println!(
                "  bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
                bbox.min.x, bbox.min.y, bbox.min.z, bbox.max.x, bbox.max.y, bbox.max.z
            );
        }
    }

    Ok(())
}
