//! Frame Solver Example - Simply Supported Beam

use anyhow::Result;
use frame_solver::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Frame Solver Example: Simple Beam ===\n");

    let mut model = FEModel::new();

    // 14 ft span in inches
    //
    //            5 kip
    //              |
    //              v
    //     N1 ============= N2
    //     ^                 o
    //   Pinned           Roller
    //
    let span = 168.0;
    model.add_node("N1", Node::new(0.0, 0.0, 0.0))?;
    model.add_node("N2", Node::new(span, 0.0, 0.0))?;

    // E = 29000 ksi, G = 11400 ksi
    let section = Section::new(29_000.0, 11_400.0, 100.0, 150.0, 250.0, 20.0);
    model.add_member("M1", "N1", "N2", section)?;

    // Torsion is restrained at N1 only
    model.define_support("N1", Support::with_restraints(true, true, true, true, false, false))?;
    model.define_support("N2", Support::with_restraints(true, true, true, false, false, false))?;

    model.add_member_point_load("M1", PointLoad::new(LoadDirection::Fy, -5.0, span / 2.0))?;

    let options = AnalysisOptions::default().with_statics_check();
    let report = model.analyze_linear(&options)?.into_result()?;

    println!("Status: {:?}\n", report.status);

    println!("=== Reactions ===");
    for node in ["N1", "N2"] {
        let r = model.node_reactions(node)?;
        println!("{node}: FY = {:.3} kip", r.fy);
    }

    println!("\n=== Member M1 ===");
    let segments = model.member_segments("M1")?;
    println!(
        "Max moment Mz: {:.3} kip-in",
        segments.max_moment(MomentDirection::Mz)
    );
    println!(
        "Min moment Mz: {:.3} kip-in",
        segments.min_moment(MomentDirection::Mz)
    );
    println!(
        "Max deflection dy: {:.5} in",
        segments.min_deflection(DeflectionDirection::Dy)
    );

    println!("\nMoment diagram (x, Mz):");
    for (x, m) in segments.moment_diagram(MomentDirection::Mz, 9) {
        println!("  {x:8.2}  {m:10.3}");
    }

    if let Some(statics) = report.statics {
        println!("\n=== Statics Check ===");
        println!("{}", serde_json::to_string_pretty(&statics)?);
    }

    println!("\n=== Summary ===");
    println!("{}", serde_json::to_string_pretty(&model.summary()?)?);

    Ok(())
}
