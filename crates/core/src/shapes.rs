//! Shapes module - static piece catalog
//!
//! Each kind owns an ordered list of rotation states. A rotation state is four
//! `(dx, dy)` offsets from the piece anchor, with `dy` growing upward.
//! Rotating clockwise steps to the next state and wraps around.

use crate::types::PieceKind;

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// One rotation state - 4 cell offsets from the anchor
pub type RotationState = [CellOffset; 4];

/// Offsets tried, in order, when a rotation does not fit in place.
pub const KICK_OFFSETS: [(i8, i8); 3] = [(1, 0), (-1, 0), (0, 1)];

const I_STATES: [RotationState; 2] = [
    // horizontal bar on row 1
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    // vertical bar on column 2
    [(2, 0), (2, 1), (2, 2), (2, 3)],
];

const O_STATES: [RotationState; 1] = [[(1, 0), (2, 0), (1, 1), (2, 1)]];

const T_STATES: [RotationState; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const L_STATES: [RotationState; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const J_STATES: [RotationState; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

const S_STATES: [RotationState; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

const Z_STATES: [RotationState; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

/// All rotation states of a kind, in clockwise order
pub fn rotation_states(kind: PieceKind) -> &'static [RotationState] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::L => &L_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
    }
}

/// Number of distinct rotation states of a kind
pub fn rotation_count(kind: PieceKind) -> usize {
    rotation_states(kind).len()
}

/// Offsets for `kind` at `rotation` (taken modulo the state count)
pub fn shape(kind: PieceKind, rotation: usize) -> RotationState {
    let states = rotation_states(kind);
    states[rotation % states.len()]
}

/// Index of the state after `current` in clockwise order
pub fn next_rotation(kind: PieceKind, current: usize) -> usize {
    (current + 1) % rotation_count(kind)
}
