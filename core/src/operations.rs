use crate::constants::{INSTRUCTION_WIDTH, SPRITE_SHEET_ADDRESS, SPRITE_SHEET_GLYPH_SIZE};
use crate::error::Fault;
use crate::instruction::Operation;
use crate::registers::Register;
use crate::state::State;

/// Where the program counter goes after an operation has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Advance by one instruction
    Next,
    /// Advance by two instructions
    Skip,
    /// Set the program counter to an address
    Goto(u16),
}

impl Flow {
    fn skip_if(condition: bool) -> Self {
        if condition {
            Flow::Skip
        } else {
            Flow::Next
        }
    }
}

/// Applies an operation to the state.
///
/// Every operand is checked before anything is written, so an `Err` leaves the
/// state exactly as it was.
pub fn execute(state: &mut State, operation: Operation) -> Result<Flow, Fault> {
    match operation {
        Operation::ClearScreen => Ok(clr(state)),
        Operation::Return => rts(state),
        Operation::Jump { addr } => Ok(Flow::Goto(addr)),
        Operation::Call { addr } => call(state, addr),
        Operation::SkipIfEqual { x, byte } => Ok(Flow::skip_if(state.registers.get(x) == byte)),
        Operation::SkipIfNotEqual { x, byte } => {
            Ok(Flow::skip_if(state.registers.get(x) != byte))
        }
        Operation::SkipIfRegistersEqual { x, y } => {
            Ok(Flow::skip_if(state.registers.get(x) == state.registers.get(y)))
        }
        Operation::SkipIfRegistersNotEqual { x, y } => {
            Ok(Flow::skip_if(state.registers.get(x) != state.registers.get(y)))
        }
        Operation::SetImmediate { x, byte } => {
            state.registers.set(x, u16::from(byte));
            Ok(Flow::Next)
        }
        Operation::AddImmediate { x, byte } => {
            let sum = u16::from(state.registers.get(x)) + u16::from(byte);
            state.registers.set(x, sum);
            Ok(Flow::Next)
        }
        Operation::Copy { x, y } => Ok(binary(state, x, y, |_, vy| vy)),
        Operation::Or { x, y } => Ok(binary(state, x, y, |vx, vy| vx | vy)),
        Operation::And { x, y } => Ok(binary(state, x, y, |vx, vy| vx & vy)),
        Operation::Xor { x, y } => Ok(binary(state, x, y, |vx, vy| vx ^ vy)),
        Operation::AddRegisters { x, y } => Ok(add(state, x, y)),
        Operation::Subtract { x, y } => Ok(sub(state, x, x, y)),
        Operation::SubtractReversed { x, y } => Ok(sub(state, x, y, x)),
        Operation::ShiftRight { x } => Ok(shr(state, x)),
        Operation::ShiftLeft { x } => Ok(shl(state, x)),
        Operation::SetAddress { addr } => {
            state.registers.set_i(addr);
            Ok(Flow::Next)
        }
        Operation::JumpOffset { addr } => {
            Ok(Flow::Goto(addr + u16::from(state.registers.get(Register::V0))))
        }
        Operation::Random { x, mask } => {
            let rand_byte: u8 = rand::random();
            state.registers.set(x, u16::from(rand_byte & mask));
            Ok(Flow::Next)
        }
        Operation::Draw { x, y, rows } => draw(state, x, y, rows),
        Operation::SkipIfKeyPressed { x } => {
            Ok(Flow::skip_if(state.is_pressed(state.registers.get(x))))
        }
        Operation::SkipIfKeyNotPressed { x } => {
            Ok(Flow::skip_if(!state.is_pressed(state.registers.get(x))))
        }
        Operation::ReadDelayTimer { x } => {
            state.registers.set(x, u16::from(state.delay_timer));
            Ok(Flow::Next)
        }
        Operation::WaitForKey { x } => {
            state.register_needing_key = Some(x);
            Ok(Flow::Next)
        }
        Operation::SetDelayTimer { x } => {
            state.delay_timer = state.registers.get(x);
            Ok(Flow::Next)
        }
        Operation::SetSoundTimer { x } => {
            state.sound_timer = state.registers.get(x);
            Ok(Flow::Next)
        }
        Operation::AddToAddress { x } => {
            let sum = state.registers.i() + u16::from(state.registers.get(x));
            state.registers.set_i(sum);
            Ok(Flow::Next)
        }
        Operation::LoadGlyph { x } => {
            let digit = u16::from(state.registers.get(x) & 0xF);
            state
                .registers
                .set_i(SPRITE_SHEET_ADDRESS + digit * SPRITE_SHEET_GLYPH_SIZE);
            Ok(Flow::Next)
        }
        Operation::StoreBcd { x } => bcd(state, x),
        Operation::StoreRegisters { x } => stor(state, x),
        Operation::LoadRegisters { x } => read(state, x),
        Operation::Unknown(word) => Err(Fault::UnknownInstruction(word)),
    }
}

/// clear
fn clr(state: &mut State) -> Flow {
    state.frame_buffer.clear();
    state.draw_flag = true;
    Flow::Next
}

/// PC = STACK.pop()
/// The popped address already points past the call.
fn rts(state: &mut State) -> Result<Flow, Fault> {
    Ok(Flow::Goto(state.stack.pop()?))
}

/// STACK.push(PC + 2); PC = addr
fn call(state: &mut State, addr: u16) -> Result<Flow, Fault> {
    state.stack.push(state.pc + INSTRUCTION_WIDTH)?;
    Ok(Flow::Goto(addr))
}

/// Vx = f(Vx, Vy)
fn binary(state: &mut State, x: Register, y: Register, f: impl Fn(u8, u8) -> u8) -> Flow {
    let result = f(state.registers.get(x), state.registers.get(y));
    state.registers.set(x, u16::from(result));
    Flow::Next
}

/// Vx += Vy; VF = overflow
fn add(state: &mut State, x: Register, y: Register) -> Flow {
    let sum = u16::from(state.registers.get(x)) + u16::from(state.registers.get(y));
    state.registers.set(x, sum);
    state.registers.set_flag(sum > 0xFF);
    Flow::Next
}

/// Vx = a - b; VF = !underflow
fn sub(state: &mut State, x: Register, a: Register, b: Register) -> Flow {
    let (a, b) = (state.registers.get(a), state.registers.get(b));
    state.registers.set(x, u16::from(a).wrapping_sub(u16::from(b)));
    state.registers.set_flag(a >= b);
    Flow::Next
}

/// Vx /= 2; VF = underflow
fn shr(state: &mut State, x: Register) -> Flow {
    let vx = state.registers.get(x);
    state.registers.set(x, u16::from(vx >> 1));
    state.registers.set_flag(vx & 0x1 == 0x1);
    Flow::Next
}

/// Vx *= 2; VF = overflow
fn shl(state: &mut State, x: Register) -> Flow {
    let vx = state.registers.get(x);
    state.registers.set(x, u16::from(vx) << 1);
    state.registers.set_flag(vx & 0x80 == 0x80);
    Flow::Next
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
fn draw(state: &mut State, x: Register, y: Register, rows: u8) -> Result<Flow, Fault> {
    let sprite = state.memory.slice(state.registers.i(), rows as usize)?;
    let x = state.registers.get(x) as usize;
    let y = state.registers.get(y) as usize;
    let collided = state.frame_buffer.draw_sprite(x, y, sprite);
    state.registers.set_flag(collided);
    state.draw_flag = true;
    Ok(Flow::Next)
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(state: &mut State, x: Register) -> Result<Flow, Fault> {
    let vx = state.registers.get(x);
    let digits = [vx / 100 % 10, vx / 10 % 10, vx % 10];
    state
        .memory
        .slice_mut(state.registers.i(), digits.len())?
        .copy_from_slice(&digits);
    Ok(Flow::Next)
}

/// mem[I..=I+x] = V0..=Vx
fn stor(state: &mut State, x: Register) -> Result<Flow, Fault> {
    let values = state.registers.up_to(x);
    state
        .memory
        .slice_mut(state.registers.i(), values.len())?
        .copy_from_slice(values);
    Ok(Flow::Next)
}

/// V0..=Vx = mem[I..=I+x]
fn read(state: &mut State, x: Register) -> Result<Flow, Fault> {
    let values = state.memory.slice(state.registers.i(), x.index() + 1)?;
    state.registers.up_to_mut(x).copy_from_slice(values);
    Ok(Flow::Next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: &mut State, word: u16) -> Result<Flow, Fault> {
        execute(state, Operation::decode(word))
    }

    fn v(index: u8) -> Register {
        Register::new(index)
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = State::default();
        state.frame_buffer.xor_pixel(0, 0);
        assert_eq!(run(&mut state, 0x00E0), Ok(Flow::Next));
        assert!(state.frame_buffer.is_blank());
        assert!(state.draw_flag);
    }

    #[test]
    fn test_00ee_ret() {
        let mut state = State::default();
        state.stack.push(0x0ABC).unwrap();
        assert_eq!(run(&mut state, 0x00EE), Ok(Flow::Goto(0x0ABC)));
        assert!(state.stack.is_empty());
    }

    #[test]
    fn test_00ee_ret_empty_stack() {
        let mut state = State::default();
        assert_eq!(run(&mut state, 0x00EE), Err(Fault::StackUnderflow));
    }

    #[test]
    fn test_1nnn_jp() {
        let mut state = State::default();
        assert_eq!(run(&mut state, 0x1ABC), Ok(Flow::Goto(0x0ABC)));
    }

    #[test]
    fn test_2nnn_call() {
        let mut state = State::default();
        state.pc = 0x0ABC;
        assert_eq!(run(&mut state, 0x2123), Ok(Flow::Goto(0x0123)));
        assert_eq!(state.stack.len(), 1);
        assert_eq!(state.stack.peek(), Some(0x0ABE));
    }

    #[test]
    fn test_2nnn_call_full_stack() {
        let mut state = State::default();
        for _ in 0..state.stack.depth() {
            state.stack.push(0x200).unwrap();
        }
        assert_eq!(run(&mut state, 0x2123), Err(Fault::StackOverflow(16)));
        assert_eq!(state.stack.len(), 16);
    }

    #[test]
    fn test_3xkk_se() {
        let mut state = State::default();
        assert_eq!(run(&mut state, 0x3111), Ok(Flow::Next));
        state.registers.set(v(1), 0x11);
        assert_eq!(run(&mut state, 0x3111), Ok(Flow::Skip));
    }

    #[test]
    fn test_4xkk_sne() {
        let mut state = State::default();
        assert_eq!(run(&mut state, 0x4111), Ok(Flow::Skip));
        state.registers.set(v(1), 0x11);
        assert_eq!(run(&mut state, 0x4111), Ok(Flow::Next));
    }

    #[test]
    fn test_5xy0_se_and_9xy0_sne() {
        let mut state = State::default();
        state.registers.set(v(1), 0x11);
        assert_eq!(run(&mut state, 0x5120), Ok(Flow::Next));
        assert_eq!(run(&mut state, 0x9120), Ok(Flow::Skip));
        state.registers.set(v(2), 0x11);
        assert_eq!(run(&mut state, 0x5120), Ok(Flow::Skip));
        assert_eq!(run(&mut state, 0x9120), Ok(Flow::Next));
    }

    #[test]
    fn test_6xkk_ld() {
        let mut state = State::default();
        run(&mut state, 0x6122).unwrap();
        assert_eq!(state.registers.get(v(1)), 0x22);
    }

    #[test]
    fn test_7xkk_add_wraps_without_flag() {
        let mut state = State::default();
        state.registers.set(v(1), 0xFF);
        run(&mut state, 0x7102).unwrap();
        assert_eq!(state.registers.get(v(1)), 0x01);
        assert_eq!(state.registers.flag(), 0x0);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut state = State::default();
        state.registers.set(v(2), 0x1);
        run(&mut state, 0x8120).unwrap();
        assert_eq!(state.registers.get(v(1)), 0x1);
    }

    #[test]
    fn test_8xy1_8xy2_8xy3_bitwise() {
        let mut state = State::default();
        state.registers.set(v(2), 0x3);
        state.registers.set(v(1), 0x6);
        run(&mut state, 0x8121).unwrap();
        assert_eq!(state.registers.get(v(1)), 0x7);
        state.registers.set(v(1), 0x6);
        run(&mut state, 0x8122).unwrap();
        assert_eq!(state.registers.get(v(1)), 0x2);
        state.registers.set(v(1), 0x6);
        run(&mut state, 0x8123).unwrap();
        assert_eq!(state.registers.get(v(1)), 0x5);
    }

    #[test]
    fn test_8xy4_add() {
        let mut state = State::default();
        state.registers.set(v(1), 0xEE);
        state.registers.set(v(2), 0x11);
        run(&mut state, 0x8124).unwrap();
        assert_eq!(state.registers.get(v(1)), 0xFF);
        assert_eq!(state.registers.flag(), 0x0);
        run(&mut state, 0x8124).unwrap();
        assert_eq!(state.registers.get(v(1)), 0x10);
        assert_eq!(state.registers.flag(), 0x1);
    }

    #[test]
    fn test_8xy4_flag_wins_over_result() {
        let mut state = State::default();
        state.registers.set(v(0xF), 0x01);
        state.registers.set(v(1), 0x01);
        run(&mut state, 0x8F14).unwrap();
        assert_eq!(state.registers.flag(), 0x0);
    }

    #[test]
    fn test_8xy5_sub() {
        let mut state = State::default();
        state.registers.set(v(1), 0x33);
        state.registers.set(v(2), 0x11);
        run(&mut state, 0x8125).unwrap();
        assert_eq!(state.registers.get(v(1)), 0x22);
        assert_eq!(state.registers.flag(), 0x1);
        state.registers.set(v(1), 0x11);
        state.registers.set(v(2), 0x12);
        run(&mut state, 0x8125).unwrap();
        assert_eq!(state.registers.get(v(1)), 0xFF);
        assert_eq!(state.registers.flag(), 0x0);
    }

    #[test]
    fn test_8xy7_subn() {
        let mut state = State::default();
        state.registers.set(v(1), 0x11);
        state.registers.set(v(2), 0x33);
        run(&mut state, 0x8127).unwrap();
        assert_eq!(state.registers.get(v(1)), 0x22);
        assert_eq!(state.registers.flag(), 0x1);
        state.registers.set(v(1), 0x12);
        state.registers.set(v(2), 0x11);
        run(&mut state, 0x8127).unwrap();
        assert_eq!(state.registers.get(v(1)), 0xFF);
        assert_eq!(state.registers.flag(), 0x0);
    }

    #[test]
    fn test_8xy6_shr() {
        let mut state = State::default();
        state.registers.set(v(1), 0x5);
        run(&mut state, 0x8106).unwrap();
        assert_eq!(state.registers.get(v(1)), 0x2);
        assert_eq!(state.registers.flag(), 0x1);
        run(&mut state, 0x8106).unwrap();
        assert_eq!(state.registers.get(v(1)), 0x1);
        assert_eq!(state.registers.flag(), 0x0);
    }

    #[test]
    fn test_8xye_shl() {
        let mut state = State::default();
        state.registers.set(v(1), 0xFF);
        run(&mut state, 0x810E).unwrap();
        // 0xFF * 2 = 0x01FE
        assert_eq!(state.registers.get(v(1)), 0xFE);
        assert_eq!(state.registers.flag(), 0x1);
        state.registers.set(v(1), 0x4);
        run(&mut state, 0x810E).unwrap();
        assert_eq!(state.registers.get(v(1)), 0x8);
        assert_eq!(state.registers.flag(), 0x0);
    }

    #[test]
    fn test_annn_ld() {
        let mut state = State::default();
        run(&mut state, 0xAABC).unwrap();
        assert_eq!(state.registers.i(), 0xABC);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut state = State::default();
        state.registers.set(v(0), 0x2);
        assert_eq!(run(&mut state, 0xBABC), Ok(Flow::Goto(0xABE)));
    }

    #[test]
    fn test_cxkk_rnd_masks() {
        let mut state = State::default();
        state.registers.set(v(1), 0xFF);
        run(&mut state, 0xC100).unwrap();
        assert_eq!(state.registers.get(v(1)), 0x0);
        run(&mut state, 0xC10F).unwrap();
        assert_eq!(state.registers.get(v(1)) & 0xF0, 0x0);
    }

    #[test]
    fn test_dxyn_drw_draws_glyph() {
        let mut state = State::default();
        state.registers.set(v(0), 0x1);
        // Draw the 0x0 glyph with a 1x 1y offset
        run(&mut state, 0xD005).unwrap();
        let expected: [[bool; 4]; 5] = [
            [true, true, true, true],
            [true, false, false, true],
            [true, false, false, true],
            [true, false, false, true],
            [true, true, true, true],
        ];
        for (row, pixels) in expected.iter().enumerate() {
            for (column, pixel) in pixels.iter().enumerate() {
                assert_eq!(state.frame_buffer.pixel(1 + column, 1 + row), *pixel);
            }
        }
        assert_eq!(state.registers.flag(), 0x0);
        assert!(state.draw_flag);
    }

    #[test]
    fn test_dxyn_drw_collides() {
        let mut state = State::default();
        state.frame_buffer.xor_pixel(0, 0);
        run(&mut state, 0xD001).unwrap();
        assert_eq!(state.registers.flag(), 0x1);
        assert!(!state.frame_buffer.pixel(0, 0));
    }

    #[test]
    fn test_dxyn_drw_reads_coordinates_before_setting_flag() {
        let mut state = State::default();
        state.registers.set(v(0xF), 0x3);
        run(&mut state, 0xDFF1).unwrap();
        assert!(state.frame_buffer.pixel(3, 3));
        assert_eq!(state.registers.flag(), 0x0);
    }

    #[test]
    fn test_dxyn_drw_out_of_bounds_sprite_faults() {
        let mut state = State::default();
        state.registers.set_i(0xFFE);
        assert_eq!(run(&mut state, 0xD003), Err(Fault::AddressingFault(0x1000)));
        assert!(state.frame_buffer.is_blank());
        assert!(!state.draw_flag);
    }

    #[test]
    fn test_ex9e_exa1_keys() {
        let mut state = State::default();
        state.registers.set(v(1), 0xE);
        assert_eq!(run(&mut state, 0xE19E), Ok(Flow::Next));
        assert_eq!(run(&mut state, 0xE1A1), Ok(Flow::Skip));
        state.pressed_keys[0xE] = true;
        assert_eq!(run(&mut state, 0xE19E), Ok(Flow::Skip));
        assert_eq!(run(&mut state, 0xE1A1), Ok(Flow::Next));
    }

    #[test]
    fn test_fx07_fx15_fx18_timers() {
        let mut state = State::default();
        state.registers.set(v(1), 0xF);
        run(&mut state, 0xF115).unwrap();
        run(&mut state, 0xF118).unwrap();
        assert_eq!((state.delay_timer, state.sound_timer), (0xF, 0xF));
        state.delay_timer = 0x3;
        run(&mut state, 0xF207).unwrap();
        assert_eq!(state.registers.get(v(2)), 0x3);
    }

    #[test]
    fn test_fx0a_sets_register_needing_key() {
        let mut state = State::default();
        assert_eq!(run(&mut state, 0xF10A), Ok(Flow::Next));
        assert_eq!(state.register_needing_key, Some(v(1)));
    }

    #[test]
    fn test_fx1e_add_uses_register_value() {
        let mut state = State::default();
        state.registers.set_i(0x1);
        state.registers.set(v(1), 0x10);
        run(&mut state, 0xF11E).unwrap();
        assert_eq!(state.registers.i(), 0x11);
    }

    #[test]
    fn test_fx1e_add_wraps_at_twelve_bits() {
        let mut state = State::default();
        state.registers.set_i(0xFFF);
        state.registers.set(v(1), 0x2);
        run(&mut state, 0xF11E).unwrap();
        assert_eq!(state.registers.i(), 0x001);
    }

    #[test]
    fn test_fx29_ld() {
        let mut state = State::default();
        state.registers.set(v(1), 0x2);
        run(&mut state, 0xF129).unwrap();
        assert_eq!(state.registers.i(), 0xA);
    }

    #[test]
    fn test_fx33_bcd() {
        let mut state = State::default();
        // 0x7B -> 123
        state.registers.set(v(1), 0x7B);
        state.registers.set_i(0x300);
        run(&mut state, 0xF133).unwrap();
        assert_eq!(state.memory.slice(0x300, 3).unwrap(), &[0x1, 0x2, 0x3]);
    }

    #[test]
    fn test_fx55_stor_and_fx65_read() {
        let mut state = State::default();
        state.registers.set_i(0x300);
        for (index, value) in (0x1..=0x5).enumerate() {
            state.registers.set(v(index as u8), value);
        }
        run(&mut state, 0xF455).unwrap();
        assert_eq!(state.memory.slice(0x300, 6).unwrap(), &[1, 2, 3, 4, 5, 0]);
        assert_eq!(state.registers.i(), 0x300);

        let mut other = State::default();
        other.memory = state.memory.clone();
        other.registers.set_i(0x300);
        run(&mut other, 0xF265).unwrap();
        assert_eq!(other.registers.up_to(v(3)), &[1, 2, 3, 0]);
    }

    #[test]
    fn test_fx55_out_of_bounds_writes_nothing() {
        let mut state = State::default();
        state.registers.set_i(0xFFE);
        state.registers.set(v(0), 0xAA);
        assert_eq!(run(&mut state, 0xF255), Err(Fault::AddressingFault(0x1000)));
        assert_eq!(state.memory.read_byte(0xFFE), Ok(0));
    }

    #[test]
    fn test_unknown_faults() {
        let mut state = State::default();
        assert_eq!(run(&mut state, 0xFFFF), Err(Fault::UnknownInstruction(0xFFFF)));
    }
}
