use hexres::config::ForceFieldConfig;
use hexres::connectivity::Hex8Connectivity;
use hexres::error::{ElementLocation, HierarchyError};
use hexres::forcefield::{ForceField, NonUniformHexForceField};
use hexres::hierarchy::{NoFinerLevels, OctreeSubdivision};
use hexres::material::ElementMaterial;
use hexres::mesh::procedural::{create_uniform_box_hex_mesh, create_unit_box_uniform_hex_mesh};
use hexres::mesh::HexMesh;
use matrixcompare::assert_scalar_eq;
use nalgebra::{Point3, Vector3};

fn zeros(n: usize) -> Vec<Vector3<f64>> {
    vec![Vector3::zeros(); n]
}

/// Deterministic, non-rigid test displacement.
fn displacement(x: &Point3<f64>) -> Vector3<f64> {
    Vector3::new(
        0.01 * x.x * x.y,
        -0.02 * x.z + 0.005 * x.x,
        0.015 * (x.x + x.y * x.z),
    )
}

fn displaced_positions(mesh: &HexMesh<f64>) -> Vec<Point3<f64>> {
    mesh.vertices().iter().map(|x| x + displacement(x)).collect()
}

fn dot(a: &[Vector3<f64>], b: &[Vector3<f64>]) -> f64 {
    a.iter().zip(b).map(|(a, b)| a.dot(b)).sum()
}

fn sum(vectors: &[Vector3<f64>]) -> Vector3<f64> {
    vectors.iter().sum()
}

#[test]
fn force_vanishes_at_rest_and_under_translation() {
    let mesh = create_unit_box_uniform_hex_mesh::<f64>(2);
    let ff = NonUniformHexForceField::new(&mesh, &NoFinerLevels, &ForceFieldConfig::default()).unwrap();
    let n = mesh.num_vertices();

    let mut f = zeros(n);
    ff.add_force(&mut f, mesh.vertices(), &zeros(n));
    assert!(f.iter().all(|f| f.norm() <= 1e-12));
    assert_eq!(ff.potential_energy(mesh.vertices()), 0.0);

    let translated: Vec<_> = mesh
        .vertices()
        .iter()
        .map(|x| x + Vector3::new(0.3, -1.0, 2.0))
        .collect();
    let mut f = zeros(n);
    ff.add_force(&mut f, &translated, &zeros(n));
    assert!(f.iter().all(|f| f.norm() <= 1e-9));
    assert!(ff.potential_energy(&translated).abs() <= 1e-9);
}

#[test]
fn energy_force_and_differential_are_consistent() {
    let mesh = create_uniform_box_hex_mesh(0.25, [4, 2, 2]);
    let ff = NonUniformHexForceField::new(&mesh, &NoFinerLevels, &ForceFieldConfig::default()).unwrap();
    let n = mesh.num_vertices();
    let x = displaced_positions(&mesh);
    let u: Vec<_> = mesh.vertices().iter().map(displacement).collect();

    let mut f = zeros(n);
    ff.add_force(&mut f, &x, &zeros(n));
    let energy = ff.potential_energy(&x);
    assert!(energy > 0.0);
    // Linear forces f = -K u, so the energy is -f.u / 2
    assert_scalar_eq!(energy, -0.5 * dot(&f, &u), comp = abs, tol = 1e-12 * energy);

    let k_factor = 0.25;
    let mut df = zeros(n);
    ff.add_force_differential(&mut df, &u, k_factor);
    for (df, f) in df.iter().zip(&f) {
        assert!((df - f * k_factor).norm() <= 1e-12 * energy.max(1.0));
    }
}

#[test]
fn forces_accumulate_into_existing_values() {
    let mesh = create_unit_box_uniform_hex_mesh::<f64>(1);
    let ff = NonUniformHexForceField::new(&mesh, &NoFinerLevels, &ForceFieldConfig::default()).unwrap();
    let x = displaced_positions(&mesh);

    let mut f = zeros(8);
    ff.add_force(&mut f, &x, &zeros(8));
    let mut f_twice = f.clone();
    ff.add_force(&mut f_twice, &x, &zeros(8));
    for (a, b) in f.iter().zip(&f_twice) {
        assert!((b - a * 2.0).norm() <= 1e-12);
    }
}

#[test]
fn consistent_and_lumped_mass_queries() {
    let mesh = create_uniform_box_hex_mesh(1.0, [2, 1, 3]);
    let volume: f64 = 6.0;
    for lumped_mass in [false, true] {
        let config = ForceFieldConfig {
            lumped_mass,
            density: 2.5,
            ..ForceFieldConfig::default()
        };
        let ff = NonUniformHexForceField::new(&mesh, &NoFinerLevels, &config).unwrap();
        let mass = ff.as_mass().unwrap();
        let n = mesh.num_vertices();
        let total = 2.5 * volume;
        assert_scalar_eq!(mass.total_mass(), total, comp = abs, tol = 1e-12 * total);

        let gravity = Vector3::new(0.0, -9.81, 0.0);
        let mut f = zeros(n);
        mass.add_gravity_force(&mut f, &gravity);
        assert!((sum(&f) - gravity * total).norm() <= 1e-10 * total);

        let velocity = Vector3::new(1.0, 2.0, -0.5);
        let v = vec![velocity; n];
        let expected_energy: f64 = 0.5 * total * velocity.norm_squared();
        assert_scalar_eq!(mass.kinetic_energy(&v), expected_energy, comp = abs, tol = 1e-12 * expected_energy);

        let mut f = zeros(n);
        mass.add_mass_dx(&mut f, &v, 2.0);
        assert!((sum(&f) - velocity * (2.0 * total)).norm() <= 1e-10 * total);
    }
}

#[test]
fn lumped_mass_is_diagonal() {
    let mesh = create_unit_box_uniform_hex_mesh::<f64>(1);
    let config = ForceFieldConfig {
        lumped_mass: true,
        ..ForceFieldConfig::default()
    };
    let ff = NonUniformHexForceField::new(&mesh, &NoFinerLevels, &config).unwrap();
    let mass = ff.mass().unwrap();
    assert!(mass.is_lumped());
    for m in mass.vertex_masses() {
        assert_scalar_eq!(m, 1.0 / 8.0, comp = abs, tol = 1e-14);
    }

    let mut dx = zeros(8);
    dx[3] = Vector3::new(1.0, 0.0, 0.0);
    let mut f = zeros(8);
    ff.as_mass().unwrap().add_mass_dx(&mut f, &dx, 1.0);
    for (i, f) in f.iter().enumerate() {
        let expected = if i == 3 { Vector3::new(1.0 / 8.0, 0.0, 0.0) } else { Vector3::zeros() };
        assert!((f - expected).norm() <= 1e-14);
    }
}

#[test]
fn mass_is_only_available_when_requested() {
    let mesh = create_unit_box_uniform_hex_mesh::<f64>(1);
    let config = ForceFieldConfig {
        use_mass: false,
        ..ForceFieldConfig::default()
    };
    let ff = NonUniformHexForceField::new(&mesh, &NoFinerLevels, &config).unwrap();
    assert!(ff.as_mass().is_none());
    assert!(ff.mass().is_none());
    assert!(ff.element_mass(0).is_none());
    assert!(ff.element_stiffness(0).is_some());
    assert!(ff.element_stiffness(1).is_none());
}

#[test]
fn accessors_describe_the_mesh() {
    let mesh = create_unit_box_uniform_hex_mesh::<f64>(2);
    let ff = NonUniformHexForceField::new(&mesh, &NoFinerLevels, &ForceFieldConfig::default()).unwrap();
    assert_eq!(ff.num_elements(), 8);
    assert_eq!(ff.rest_positions(), mesh.vertices());
    assert_eq!(ff.connectivity(), mesh.connectivity());
    assert_eq!(ff.tree().num_records(), 8);
    assert!(ff.element_mass(7).is_some());
}

#[test]
fn virtual_levels_with_uniform_material_match_direct_matrices() {
    let mesh = create_unit_box_uniform_hex_mesh::<f64>(2);
    let config = ForceFieldConfig::default();
    let direct = NonUniformHexForceField::new(&mesh, &NoFinerLevels, &config).unwrap();

    let provider = OctreeSubdivision::from_mesh(&mesh, config.default_material()).unwrap();
    let refined_config = ForceFieldConfig {
        virtual_finer_levels: 2,
        ..config.clone()
    };
    let refined = NonUniformHexForceField::new(&mesh, &provider, &refined_config).unwrap();
    assert_eq!(refined.tree().num_leaves(), 8 * 64);

    for i in 0..mesh.num_elements() {
        let k = direct.element_stiffness(i).unwrap();
        let k_refined = refined.element_stiffness(i).unwrap();
        assert!((k_refined - k).amax() <= 1e-10 * k.amax());
        let m = direct.element_mass(i).unwrap();
        let m_refined = refined.element_mass(i).unwrap();
        assert!((m_refined - m).amax() <= 1e-10 * m.amax());
    }
}

#[test]
fn provider_material_overrides_configuration() {
    let mesh = create_unit_box_uniform_hex_mesh::<f64>(1);
    let config = ForceFieldConfig::default();
    let material = ElementMaterial::new(2.0 * config.young_modulus, config.poisson_ratio, 3.0);
    let provider = OctreeSubdivision::from_mesh(&mesh, material).unwrap();

    let ff = NonUniformHexForceField::new(&mesh, &provider, &config).unwrap();
    let default = NonUniformHexForceField::new(&mesh, &NoFinerLevels, &config).unwrap();
    let k = ff.element_stiffness(0).unwrap();
    let k_default = default.element_stiffness(0).unwrap();
    assert!((k - k_default * 2.0).amax() <= 1e-12 * k.amax());
    assert_scalar_eq!(ff.as_mass().unwrap().total_mass(), 3.0, comp = abs, tol = 1e-12);
}

#[test]
fn virtual_levels_without_topology_fail_setup() {
    let mesh = create_unit_box_uniform_hex_mesh::<f64>(1);
    let config = ForceFieldConfig {
        virtual_finer_levels: 1,
        ..ForceFieldConfig::default()
    };
    let err = NonUniformHexForceField::new(&mesh, &NoFinerLevels, &config).unwrap_err();
    assert_eq!(
        err.downcast_ref::<HierarchyError>(),
        Some(&HierarchyError::MissingFinerLevel {
            location: ElementLocation { level: 0, element: 0 }
        })
    );
}

#[test]
fn invalid_connectivity_fails_setup() {
    let unit = create_unit_box_uniform_hex_mesh::<f64>(1);
    let mesh = HexMesh::from_vertices_and_connectivity(
        unit.vertices().to_vec(),
        vec![unit.connectivity()[0], Hex8Connectivity([0, 1, 2, 3, 4, 5, 6, 8])],
    );
    let err = NonUniformHexForceField::new(&mesh, &NoFinerLevels, &ForceFieldConfig::default()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<HierarchyError>(),
        Some(&HierarchyError::InvalidNodeData {
            location: ElementLocation { level: 0, element: 1 }
        })
    );
}

#[test]
fn inverted_element_fails_setup() {
    let mut mesh = create_unit_box_uniform_hex_mesh::<f64>(1);
    mesh.transform_vertices(|p| p.z = -p.z);
    let err = NonUniformHexForceField::new(&mesh, &NoFinerLevels, &ForceFieldConfig::default()).unwrap_err();
    assert!(err
        .downcast_ref::<HierarchyError>()
        .is_some_and(HierarchyError::is_geometric));
}
