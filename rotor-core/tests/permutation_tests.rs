#![allow(missing_docs)]

mod common;

use common::{REFLECTOR_B, perm, wiring};
use rand::rngs::OsRng;
use rotor_core::CipherError;
use rotor_core::permutation::Permutation;

#[test]
fn tables_are_mutual_inverses() {
    let p = perm(REFLECTOR_B);
    for x in 0..p.size() {
        assert_eq!(p.decrypt(p.encrypt(x)), x);
        assert_eq!(p.encrypt(p.decrypt(x)), x);
    }
}

#[test]
fn lenient_construction_reduces_mod_n() {
    // 7 reduces to 2, 9 to 4: the historical lenient entry point.
    let p = Permutation::new(&[7, 0, 1, 3, 9]);
    assert_eq!(p.encrypt(0), 2);
    assert_eq!(p.encrypt(4), 4);
    for x in 0..5 {
        assert_eq!(p.decrypt(p.encrypt(x)), x);
    }
}

#[test]
fn checked_construction_rejects_duplicates() {
    let err = Permutation::new_checked(&[0, 1, 1, 3]).unwrap_err();
    assert!(matches!(err, CipherError::NotBijective(4)));
}

#[test]
fn checked_construction_rejects_out_of_range() {
    let err = Permutation::new_checked(&[0, 1, 2, 7]).unwrap_err();
    assert!(matches!(err, CipherError::NotBijective(4)));
}

#[test]
fn modify_keeps_both_tables_consistent() {
    let mut p = Permutation::identity(6);
    p.modify(&[(0, 3)]);
    assert_eq!(p.encrypt(0), 3);
    assert_eq!(p.encrypt(3), 0);

    // Interleave a second, overlapping transposition.
    p.modify(&[(3, 5), (1, 2)]);
    for x in 0..6 {
        assert_eq!(p.decrypt(p.encrypt(x)), x, "tables diverged at {x}");
    }
    assert_eq!(p.encrypt(0), 5);
    assert_eq!(p.encrypt(5), 3);
}

#[test]
fn get_inverse_swaps_directions() {
    let p = perm(common::ROTOR_I);
    let q = p.get_inverse();
    for x in 0..p.size() {
        assert_eq!(q.encrypt(x), p.decrypt(x));
        assert_eq!(q.decrypt(x), p.encrypt(x));
    }
}

#[test]
fn switch_to_inverse_is_an_in_place_swap() {
    let mut p = perm(common::ROTOR_II);
    let original = p.clone();
    p.switch_to_inverse();
    for x in 0..p.size() {
        assert_eq!(p.encrypt(x), original.decrypt(x));
    }
    p.switch_to_inverse();
    assert_eq!(p, original);
}

#[test]
fn thirteen_disjoint_pairs_form_an_involution() {
    let mut image: Vec<usize> = (0..26).collect();
    let pairs: [(usize, usize); 13] = [
        (0, 25),
        (1, 24),
        (2, 23),
        (3, 22),
        (4, 21),
        (5, 20),
        (6, 19),
        (7, 18),
        (8, 17),
        (9, 16),
        (10, 15),
        (11, 14),
        (12, 13),
    ];
    for &(a, b) in &pairs {
        image[a] = b;
        image[b] = a;
    }
    let p = Permutation::new_checked(&image).unwrap();
    let cycles = p.test_for_involution().expect("disjoint pairs are an involution");
    assert_eq!(cycles.len(), 13);
    assert_eq!(cycles, pairs.to_vec());
}

#[test]
fn fixed_points_are_not_an_involution() {
    assert!(Permutation::identity(26).test_for_involution().is_none());
}

#[test]
fn asymmetry_is_not_an_involution() {
    // A 3-cycle over the first contacts: self-inverse nowhere.
    let mut image: Vec<usize> = (0..26).collect();
    image[0] = 1;
    image[1] = 2;
    image[2] = 0;
    image[3] = 4;
    image[4] = 3;
    let p = Permutation::new_checked(&image).unwrap();
    assert!(p.test_for_involution().is_none());
}

#[test]
fn reflector_b_is_an_involution() {
    let cycles = perm(REFLECTOR_B)
        .test_for_involution()
        .expect("reflector B has thirteen plug pairs");
    assert_eq!(cycles.len(), 13);
}

#[test]
fn random_permutation_is_a_bijection() {
    let mut rng = OsRng;
    let p = Permutation::random(&mut rng, 40).expect("entropy available");
    assert_eq!(p.size(), 40);
    let mut seen = vec![false; 40];
    for x in 0..40 {
        let y = p.encrypt(x);
        assert!(!seen[y], "value {y} produced twice");
        seen[y] = true;
        assert_eq!(p.decrypt(y), x);
    }
}

#[test]
fn random_involution_passes_its_own_test() {
    let mut rng = OsRng;
    let p = Permutation::random_involution(&mut rng, 26).expect("entropy available");
    let cycles = p.test_for_involution().expect("generated involution");
    assert_eq!(cycles.len(), 13);
}

#[test]
fn random_involution_rejects_odd_sizes() {
    let mut rng = OsRng;
    let err = Permutation::random_involution(&mut rng, 25).unwrap_err();
    assert!(matches!(err, CipherError::OddInvolution(25)));
}

#[test]
fn lenient_wiring_matches_checked_wiring_for_good_data() {
    let image = wiring(common::ROTOR_V);
    assert_eq!(Permutation::new(&image), Permutation::new_checked(&image).unwrap());
}
