#![allow(missing_docs)]

mod common;

use std::fs;

use common::{enigma_b_123, letters, sym};
use rotor_core::CipherError;
use rotor_core::alphabet::Alphabet;
use rotor_core::machine::MachineState;
use rotor_core::permutation::Permutation;
use tempfile::tempdir;

// Reference vector reproduced by independent Enigma simulators: reflector
// B, rotors I II III, ring settings AAA, start positions AAA.
#[test]
fn enigma_known_answer_aaaaa() {
    let mut machine = enigma_b_123();
    let ciphertext = machine.encrypt_sequence(&[sym('A'); 5]);
    assert_eq!(letters(&ciphertext), "BDZGO");
}

#[test]
fn enigma_known_answer_decrypts_back() {
    let mut machine = enigma_b_123();
    let ciphertext = machine.encrypt_sequence(&[sym('A'); 5]);
    machine.reset();
    let plaintext = machine.decrypt_sequence(&ciphertext);
    assert_eq!(letters(&plaintext), "AAAAA");
}

// The documented middle-wheel anomaly: from ADU the window sequence runs
// ADV, AEW, BFX, BFY; a naive single-carry odometer would leave the
// middle wheel at E one step longer.
#[test]
fn enigma_double_step_sequence() {
    let mut machine = enigma_b_123();
    let gear = machine.gear_mut();
    gear.set_position(2, sym('A'));
    gear.set_position(1, sym('D'));
    gear.set_position(0, sym('U'));

    let mut windows = Vec::new();
    for _ in 0..4 {
        machine.encrypt(sym('A'));
        let gear = machine.gear();
        windows.push((
            gear.get_position(2),
            gear.get_position(1),
            gear.get_position(0),
        ));
    }
    let expected: Vec<(usize, usize, usize)> = ["ADV", "AEW", "BFX", "BFY"]
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            (
                sym(chars.next().unwrap()),
                sym(chars.next().unwrap()),
                sym(chars.next().unwrap()),
            )
        })
        .collect();
    assert_eq!(windows, expected);
}

#[test]
fn identical_machines_produce_identical_streams() {
    let mut first = enigma_b_123();
    let mut second = enigma_b_123();
    let plaintext: Vec<usize> = (0..200).map(|i| i % 26).collect();
    assert_eq!(
        first.encrypt_sequence(&plaintext),
        second.encrypt_sequence(&plaintext)
    );
    assert_eq!(first.save_state(), second.save_state());
}

// Encrypt on machine A, persist the start positions, rebuild a machine
// with identical wiring from the snapshot, decrypt A's ciphertext.
#[test]
fn save_restore_reproduces_the_plaintext() {
    let alphabet = Alphabet::latin();
    let plaintext = alphabet.encode_lossy("hallo dies ist wieder ein test");

    let mut machine_a = enigma_b_123();
    let gear = machine_a.gear_mut();
    gear.set_ring_offset(0, 3).unwrap();
    gear.set_ring_offset(1, 7).unwrap();
    gear.set_position(0, 11);
    gear.set_position(1, 4);
    gear.set_position(2, 19);
    let snapshot = machine_a.save_state();
    let ciphertext = machine_a.encrypt_sequence(&plaintext);

    let dir = tempdir().expect("temp dir available");
    let path = dir.path().join("positions.json");
    let encoded = serde_json::to_string_pretty(&snapshot).expect("snapshot serializes");
    fs::write(&path, encoded).expect("snapshot written");

    let restored: MachineState =
        serde_json::from_str(&fs::read_to_string(&path).expect("snapshot read"))
            .expect("snapshot parses");
    let mut machine_b = enigma_b_123();
    machine_b.restore_state(&restored).expect("layouts match");

    let recovered = machine_b.decrypt_sequence(&ciphertext);
    assert_eq!(alphabet.decode_seq(&recovered), "hallodiesistwiedereintest");
}

#[test]
fn snapshot_round_trips_exactly() {
    let mut machine = enigma_b_123();
    machine.gear_mut().set_ring_offset(0, 9).unwrap();
    machine.gear_mut().set_position(1, 17);
    let snapshot = machine.save_state();

    let mut other = enigma_b_123();
    other.restore_state(&snapshot).unwrap();
    assert_eq!(other.save_state(), snapshot);

    // Continued operation matches as well.
    let tail: Vec<usize> = (0..40).map(|i| (i * 5) % 26).collect();
    assert_eq!(
        machine.encrypt_sequence(&tail),
        other.encrypt_sequence(&tail)
    );
}

#[test]
fn restore_rejects_foreign_snapshots() {
    let mut machine = enigma_b_123();
    let snapshot = MachineState {
        displacements: vec![0; 2],
        ring_offsets: vec![None; 2],
    };
    let err = machine.restore_state(&snapshot).unwrap_err();
    assert!(matches!(
        err,
        CipherError::SizeMismatch {
            expected: 3,
            actual: 2
        }
    ));
}

// A snapshot with an offset for the ringless slow slot must be rejected
// before any slot is written, so the machine keeps its prior state.
#[test]
fn rejected_snapshot_leaves_the_machine_untouched() {
    let mut machine = enigma_b_123();
    machine.gear_mut().set_ring_offset(0, 4).unwrap();
    machine.gear_mut().set_position(1, 12);
    let before = machine.save_state();

    let snapshot = MachineState {
        displacements: vec![9, 9, 9],
        ring_offsets: vec![Some(1), Some(2), Some(5)],
    };
    let err = machine.restore_state(&snapshot).unwrap_err();
    assert!(matches!(err, CipherError::Configuration(_)));
    assert_eq!(machine.save_state(), before);

    // The untouched machine still matches a twin that never saw the
    // rejected snapshot.
    let mut twin = enigma_b_123();
    twin.restore_state(&before).unwrap();
    let tail: Vec<usize> = (0..30).map(|i| (i * 7) % 26).collect();
    assert_eq!(machine.encrypt_sequence(&tail), twin.encrypt_sequence(&tail));
}

#[test]
fn reflector_must_be_an_involution() {
    let mut machine = enigma_b_123();
    // A cyclic shift is bijective but nowhere self-inverse.
    let image: Vec<usize> = (0..26).map(|i| (i + 1) % 26).collect();
    let err = machine
        .set_reflector(Permutation::new_checked(&image).unwrap())
        .unwrap_err();
    assert!(matches!(err, CipherError::Configuration(_)));
}

#[test]
fn plugboard_must_be_self_inverse() {
    let mut machine = enigma_b_123();
    let image: Vec<usize> = (0..26).map(|i| (i + 1) % 26).collect();
    let err = machine
        .set_plugboard(Permutation::new_checked(&image).unwrap())
        .unwrap_err();
    assert!(matches!(err, CipherError::Configuration(_)));
}

#[test]
fn plugboard_preserves_the_round_trip() {
    let mut image: Vec<usize> = (0..26).collect();
    for &(a, b) in &[(0, 4), (1, 9), (2, 20), (7, 13), (11, 25)] {
        image[a] = b;
        image[b] = a;
    }
    let plugboard = Permutation::new_checked(&image).unwrap();

    let mut machine = enigma_b_123();
    machine.set_plugboard(plugboard).unwrap();
    let plaintext: Vec<usize> = (0..60).map(|i| (i * 11) % 26).collect();
    let ciphertext = machine.encrypt_sequence(&plaintext);
    machine.reset();
    assert_eq!(machine.decrypt_sequence(&ciphertext), plaintext);
}

#[test]
fn reflecting_encryption_never_maps_a_letter_to_itself() {
    let mut machine = enigma_b_123();
    for i in 0..100 {
        let input = i % 26;
        assert_ne!(machine.encrypt(input), input);
    }
}

#[test]
fn runtime_reflecting_toggle_turns_around_on_the_last_rotor() {
    let mut machine = enigma_b_123();
    machine.clear_reflector();
    // Still reflecting: the slow rotor is now the turnaround.
    assert!(machine.is_reflecting());
    let ciphertext = machine.encrypt_sequence(&[sym('H'), sym('I')]);
    machine.reset();
    assert_eq!(
        machine.decrypt_sequence(&ciphertext),
        vec![sym('H'), sym('I')]
    );

    // Straight-through mode uses the same stack without a turnaround.
    machine.set_reflecting(false);
    machine.reset();
    let straight = machine.encrypt_sequence(&[sym('H'), sym('I')]);
    machine.reset();
    assert_eq!(
        machine.decrypt_sequence(&straight),
        vec![sym('H'), sym('I')]
    );
}

#[test]
fn alphabet_round_trips_and_rejects_foreign_chars() {
    let alphabet = Alphabet::latin();
    assert_eq!(alphabet.len(), 26);
    assert_eq!(alphabet.encode('a').unwrap(), 0);
    assert_eq!(alphabet.decode(25), Some('z'));
    assert!(matches!(
        alphabet.encode_str("not ok").unwrap_err(),
        CipherError::UnknownSymbol(' ')
    ));
    assert_eq!(alphabet.encode_lossy("a b"), vec![0, 1]);
}
