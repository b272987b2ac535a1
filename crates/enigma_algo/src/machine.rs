//! Three-rotor Enigma I simulator with double-stepping.
//!
//! Conventions:
//! - Slot 0 is the left (slow) rotor, slot 2 the right (fast) rotor.
//! - Rotors advance *before* each substitution.
//! - The signal path is right → middle → left → reflector → left⁻¹ → middle⁻¹ → right⁻¹.
//! - No plugboard and no ring settings: every rotor offset is its window position.
//!
//! A machine is cheap to re-initialize; search workers keep one and call
//! [`EnigmaMachine::reset`] per key instead of allocating.

use core::fmt;

use enigma_core::{CoreError, Letter, ReflectorId, Rotor, RotorId};

const N: u8 = Letter::COUNT as u8;

/// Initial key: start positions plus the rotor and reflector choice.
#[derive(Clone, Copy, Debug)]
pub struct MachineConfig<'r> {
    /// Window letters, left to right.
    pub start: [Letter; 3],
    /// Rotors, left to right.
    pub rotors: [&'r Rotor; 3],
    pub reflector: &'r Rotor,
}

impl<'r> MachineConfig<'r> {
    pub fn new(start: [Letter; 3], rotors: [&'r Rotor; 3], reflector: &'r Rotor) -> Self {
        Self { start, rotors, reflector }
    }
}

impl MachineConfig<'static> {
    /// Config over the process-wide rotor table.
    pub fn from_ids(start: [Letter; 3], rotors: [RotorId; 3], reflector: ReflectorId) -> Self {
        Self {
            start,
            rotors: rotors.map(RotorId::rotor),
            reflector: reflector.reflector(),
        }
    }
}

/// Stateful machine. Positions are rotor offsets in `0..26`.
#[derive(Clone, Debug)]
pub struct EnigmaMachine<'r> {
    rotors: [&'r Rotor; 3],
    reflector: &'r Rotor,
    positions: [u8; 3],
    start: [Letter; 3],
}

impl<'r> EnigmaMachine<'r> {
    pub fn new(config: &MachineConfig<'r>) -> Self {
        Self {
            rotors: config.rotors,
            reflector: config.reflector,
            positions: config.start.map(|l| l.index() as u8),
            start: config.start,
        }
    }

    /// Re-initialize from `config`, discarding all stepping state.
    #[inline]
    pub fn reset(&mut self, config: &MachineConfig<'r>) {
        *self = Self::new(config);
    }

    /// Current `(left, middle, right)` positions.
    pub fn positions(&self) -> [u8; 3] {
        self.positions
    }

    /// Advance the rotors for one keystroke and return the new positions,
    /// without enciphering anything.
    pub fn advance(&mut self) -> [u8; 3] {
        let [_, middle, right] = self.rotors;
        let [pa, pb, pc] = &mut self.positions;

        *pc = (*pc + 1) % N;
        if right.turnover(*pc) {
            *pb = (*pb + 1) % N;
            if middle.turnover(*pb) {
                *pa = (*pa + 1) % N;
            }
        }

        // Double step: the middle rotor's own pawl engages one keystroke after
        // the right rotor carried it onto the position before its notch.
        if right.turnover((*pc + N - 1) % N) && middle.turnover((*pb + 1) % N) {
            *pb = (*pb + 1) % N;
            if middle.turnover(*pb) {
                *pa = (*pa + 1) % N;
            }
        }

        self.positions
    }

    /// Encipher one letter (advancing first). Enciphering is its own inverse.
    #[inline]
    pub fn step(&mut self, input: Letter) -> Letter {
        self.advance();
        let [left, middle, right] = self.rotors;
        let [pa, pb, pc] = self.positions;

        let mut i = input.index() as u8;
        i = pass(right.forward_table(), pc, i);
        i = pass(middle.forward_table(), pb, i);
        i = pass(left.forward_table(), pa, i);
        i = self.reflector.forward_table()[i as usize];
        i = pass(left.inverse_table(), pa, i);
        i = pass(middle.inverse_table(), pb, i);
        i = pass(right.inverse_table(), pc, i);

        Letter::wrapping(i as usize)
    }

    /// Character-level `step`; anything outside A–Z is rejected before the
    /// rotors move.
    pub fn step_char(&mut self, c: char) -> Result<char, CoreError> {
        let l = Letter::try_from(c)?;
        Ok(self.step(l).to_char())
    }

    /// Encipher a whole message from the current state.
    pub fn process(&mut self, input: &[Letter]) -> Vec<Letter> {
        input.iter().map(|&l| self.step(l)).collect()
    }

    /// Character-level `process`.
    pub fn process_str(&mut self, input: &str) -> Result<String, CoreError> {
        input.chars().map(|c| self.step_char(c)).collect()
    }
}

/// One rotor pass at offset `position`: shift in, substitute, shift out.
#[inline(always)]
fn pass(table: &[u8; Letter::COUNT], position: u8, i: u8) -> u8 {
    let j = (i + position) % N;
    (table[j as usize] + N - position) % N
}

impl fmt::Display for EnigmaMachine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.start;
        let [left, middle, right] = self.rotors;
        writeln!(f, "KEY: {a}{b}{c}")?;
        writeln!(f, "ROTORS: {left}, {middle}, {right}")?;
        write!(f, "REFLECTOR: {}", self.reflector)
    }
}
