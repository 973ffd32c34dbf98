use approx::assert_relative_eq;
use frame_solver::prelude::*;

const E: f64 = 1000.0;
const T: f64 = 0.1;
const NU: f64 = 0.3;
const SIZE: f64 = 2.0;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn node_name(ix: usize, iy: usize) -> String {
    format!("N{ix}_{iy}")
}

/// Square `SIZE` x `SIZE` plate in the XY plane split into n x n elements
fn mesh(n: usize) -> FEModel {
    let mut model = FEModel::new();
    let step = SIZE / n as f64;
    for ix in 0..=n {
        for iy in 0..=n {
            let node = Node::new(ix as f64 * step, iy as f64 * step, 0.0);
            model.add_node(&node_name(ix, iy), node).unwrap();
        }
    }
    for ix in 0..n {
        for iy in 0..n {
            let corners = [
                node_name(ix, iy),
                node_name(ix, iy + 1),
                node_name(ix + 1, iy + 1),
                node_name(ix + 1, iy),
            ];
            model
                .add_plate(
                    &format!("P{ix}_{iy}"),
                    [&corners[0], &corners[1], &corners[2], &corners[3]],
                    T,
                    E,
                    NU,
                )
                .unwrap();
        }
    }
    model
}

/// Edge length tributary to node `i` of `n` + 1 nodes along an edge
fn tributary(i: usize, n: usize) -> f64 {
    let step = SIZE / n as f64;
    if i == 0 || i == n {
        step / 2.0
    } else {
        step
    }
}

/// Uniform tension of 5 across the x = SIZE edge
fn membrane_patch(n: usize) -> FEModel {
    let mut model = mesh(n);
    for ix in 0..=n {
        for iy in 0..=n {
            let support = Support::with_restraints(ix == 0, iy == 0, true, true, true, true);
            model.define_support(&node_name(ix, iy), support).unwrap();
        }
    }
    for iy in 0..=n {
        model
            .add_node_load(&node_name(n, iy), NodeLoad::fx(5.0 * T * tributary(iy, n)))
            .unwrap();
    }
    model
}

/// Uniform moment Mx = 2 applied along the x = 0 and x = SIZE edges
fn bending_patch(n: usize) -> FEModel {
    let mut model = mesh(n);
    for ix in 0..=n {
        for iy in 0..=n {
            let support = Support::with_restraints(true, true, false, false, false, true);
            model.define_support(&node_name(ix, iy), support).unwrap();
        }
    }
    model.define_support(&node_name(0, 0), Support::fixed()).unwrap();
    for iy in 0..=n {
        model
            .add_node_load(&node_name(n, iy), NodeLoad::my(2.0 * tributary(iy, n)))
            .unwrap();
        if iy > 0 {
            model
                .add_node_load(&node_name(0, iy), NodeLoad::my(-2.0 * tributary(iy, n)))
                .unwrap();
        }
    }
    model
}

#[test]
fn membrane_patch_reproduces_uniform_stress() {
    init_logging();
    for n in [1, 2] {
        let mut model = membrane_patch(n);
        let report = model
            .analyze_linear(&AnalysisOptions::default().with_statics_check())
            .unwrap();
        assert_eq!(report.status, AnalysisStatus::Solved);

        let corner = model.node_displacement(&node_name(n, n)).unwrap();
        assert_relative_eq!(corner.dx, 5.0 / E * SIZE, max_relative = 1e-9);
        assert_relative_eq!(corner.dy, -NU * 5.0 / E * SIZE, max_relative = 1e-9);
        assert_relative_eq!(corner.dz, 0.0);

        for name in model.plate_names().map(str::to_string).collect::<Vec<_>>() {
            let actions = model.plate(&name).unwrap().center_actions().unwrap();
            assert_relative_eq!(actions.sx, 5.0, max_relative = 1e-9);
            assert_relative_eq!(actions.sy, 0.0, epsilon = 1e-9);
            assert_relative_eq!(actions.txy, 0.0, epsilon = 1e-9);
            assert_relative_eq!(actions.mx, 0.0, epsilon = 1e-12);
        }

        let statics = report.statics.unwrap();
        assert_relative_eq!(statics.applied[0], 5.0 * T * SIZE, max_relative = 1e-12);
        assert_relative_eq!(statics.reactions[0], -5.0 * T * SIZE, max_relative = 1e-9);
        assert!(statics.is_balanced(1e-9));
    }
}

#[test]
fn bending_patch_reproduces_uniform_moment() {
    init_logging();
    for n in [1, 2] {
        let mut model = bending_patch(n);
        model.analyze_linear(&AnalysisOptions::default()).unwrap();

        // w = -12 x^2 + 3.6 y^2 for Mx = 2, My = 0
        let corner = model.node_displacement(&node_name(n, n)).unwrap();
        assert_relative_eq!(corner.dz, -33.6, max_relative = 1e-9);
        assert_relative_eq!(corner.ry, 48.0, max_relative = 1e-9);
        assert_relative_eq!(corner.rx, 14.4, max_relative = 1e-9);

        for name in model.plate_names().map(str::to_string).collect::<Vec<_>>() {
            let plate = model.plate(&name).unwrap();
            let [mx, my, mxy] = plate.moment(plate.width() / 3.0, plate.height() / 4.0).unwrap();
            assert_relative_eq!(mx, 2.0, max_relative = 1e-9);
            assert_relative_eq!(my, 0.0, epsilon = 1e-9);
            assert_relative_eq!(mxy, 0.0, epsilon = 1e-9);

            let [qx, qy] = plate.shear(plate.width() / 2.0, plate.height() / 2.0).unwrap();
            assert_relative_eq!(qx, 0.0, epsilon = 1e-9);
            assert_relative_eq!(qy, 0.0, epsilon = 1e-9);
        }

        // The origin carries the edge moment that was not applied there
        let origin = model.node_reactions(&node_name(0, 0)).unwrap();
        assert_relative_eq!(origin.my, -2.0 * tributary(0, n), max_relative = 1e-9);
        assert_relative_eq!(origin.fz, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn non_rectangular_plate_is_accepted() {
    init_logging();
    let mut model = FEModel::new();
    model.add_node("A", Node::new(0.0, 0.0, 0.0)).unwrap();
    model.add_node("B", Node::new(0.0, 1.0, 0.0)).unwrap();
    model.add_node("C", Node::new(1.2, 1.0, 0.0)).unwrap();
    model.add_node("D", Node::new(1.0, 0.0, 0.0)).unwrap();
    assert!(model.add_plate("P", ["A", "B", "C", "D"], T, E, NU).is_ok());
}

#[test]
fn invalid_plate_input_is_rejected() {
    let mut model = mesh(1);
    assert!(matches!(
        model.add_plate("BAD", ["N0_0", "N0_1", "N1_1", "N1_0"], 0.0, E, NU),
        Err(FEAError::InvalidInput(_))
    ));
    assert!(matches!(
        model.add_plate("BAD", ["N0_0", "N0_1", "N1_1", "N1_0"], T, E, 0.5),
        Err(FEAError::InvalidInput(_))
    ));
    assert!(matches!(
        model.add_plate("P0_0", ["N0_0", "N0_1", "N1_1", "N1_0"], T, E, NU),
        Err(FEAError::DuplicateName(_))
    ));
    assert!(matches!(
        model.add_plate("BAD", ["N0_0", "N0_0", "N1_1", "N1_0"], T, E, NU),
        Err(FEAError::InvalidGeometry(_))
    ));
}
