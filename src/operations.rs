use ::rand::Rng;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER};
use crate::cpu::Cpu;
use crate::error::{Error, Result};

/// clear
pub fn clr(cpu: &mut Cpu) {
    cpu.display.clear();
}

/// PC = STACK.pop()
pub fn ret(cpu: &mut Cpu) -> Result<()> {
    cpu.pc = cpu.stack.pop().ok_or(Error::StackUnderflow)?;
    Ok(())
}

/// PC = addr
pub fn jump(cpu: &mut Cpu, addr: u16) {
    cpu.pc = addr;
}

/// STACK.push(PC); PC = addr
pub fn call(cpu: &mut Cpu, addr: u16) {
    cpu.stack.push(cpu.pc);
    cpu.pc = addr;
}

/// Vx = kk
pub fn load(cpu: &mut Cpu, x: u8, kk: u8) {
    cpu.v[x as usize] = kk;
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(cpu: &mut Cpu, x: u8, kk: u8) {
    cpu.v[x as usize] = cpu.v[x as usize].wrapping_add(kk);
}

/// Vx = Vy
pub fn mv(cpu: &mut Cpu, x: u8, y: u8) {
    cpu.v[x as usize] = cpu.v[y as usize];
}

/// Vx |= Vy
pub fn or(cpu: &mut Cpu, x: u8, y: u8) {
    cpu.v[x as usize] |= cpu.v[y as usize];
}

/// Vx &= Vy
pub fn and(cpu: &mut Cpu, x: u8, y: u8) {
    cpu.v[x as usize] &= cpu.v[y as usize];
}

/// Vx ^= Vy
pub fn xor(cpu: &mut Cpu, x: u8, y: u8) {
    cpu.v[x as usize] ^= cpu.v[y as usize];
}

/// Vx += Vy; VF = overflow
pub fn addr(cpu: &mut Cpu, x: u8, y: u8) {
    let (res, over) = cpu.v[x as usize].overflowing_add(cpu.v[y as usize]);
    cpu.v[FLAG_REGISTER] = over as u8;
    cpu.v[x as usize] = res;
}

/// Vx -= Vy; VF = !underflow
pub fn sub(cpu: &mut Cpu, x: u8, y: u8) {
    let (res, under) = cpu.v[x as usize].overflowing_sub(cpu.v[y as usize]);
    cpu.v[FLAG_REGISTER] = !under as u8;
    cpu.v[x as usize] = res;
}

/// Vx = Vy >> 1; VF = the least significant bit of Vy
/// Vy is copied into Vx before the shift, as on the COSMAC VIP
pub fn shr(cpu: &mut Cpu, x: u8, y: u8) {
    let value = cpu.v[y as usize];
    cpu.v[x as usize] = value >> 1;
    cpu.v[FLAG_REGISTER] = value & 0x1;
}

/// Vx = Vy << 1; VF = the most significant bit of Vy
/// Vy is copied into Vx before the shift, as on the COSMAC VIP
pub fn shl(cpu: &mut Cpu, x: u8, y: u8) {
    let value = cpu.v[y as usize];
    cpu.v[x as usize] = value << 1;
    cpu.v[FLAG_REGISTER] = value >> 7;
}

/// I = addr
pub fn loadi(cpu: &mut Cpu, addr: u16) {
    cpu.i = addr;
}

/// PC = V0 + addr
pub fn jumpi(cpu: &mut Cpu, addr: u16) {
    cpu.pc = addr + u16::from(cpu.v[0x0]);
}

/// Vx = rand_byte & kk
pub fn rand(cpu: &mut Cpu, x: u8, kk: u8) {
    let rand_byte: u8 = cpu.rng.gen();
    cpu.v[x as usize] = rand_byte & kk;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the display.
/// The starting position wraps, but the sprite itself is clipped at the
/// right and bottom edges.
/// Sets VF if any pixels were erased
pub fn draw(cpu: &mut Cpu, x: u8, y: u8, n: u8) -> Result<()> {
    let x0 = cpu.v[x as usize] as usize & (DISPLAY_WIDTH - 1);
    let y0 = cpu.v[y as usize] as usize & (DISPLAY_HEIGHT - 1);

    // Rows below the bottom edge are never read; the rest are read up front
    // so a bad address leaves the display and VF untouched
    let rows = (n as usize).min(DISPLAY_HEIGHT - y0);
    let sprite = (0..rows)
        .map(|row| cpu.memory.get_byte(cpu.i as usize + row))
        .collect::<Result<Vec<u8>>>()?;

    // Reset the carry flag (used for collision detection)
    cpu.v[FLAG_REGISTER] = 0x0;

    for (row, sprite_byte) in sprite.into_iter().enumerate() {
        let py = y0 + row;
        for bit in 0..8 {
            let px = x0 + bit;
            if px >= DISPLAY_WIDTH {
                break;
            }
            if (sprite_byte >> (7 - bit)) & 1 == 0 {
                continue;
            }
            if cpu.display.get(px, py) {
                cpu.display.set(px, py, false);
                cpu.v[FLAG_REGISTER] = 0x1;
            } else {
                cpu.display.set(px, py, true);
            }
        }
    }
    Ok(())
}

/// Vx = DT
pub fn moved(cpu: &mut Cpu, x: u8) {
    cpu.v[x as usize] = cpu.timers.delay.get();
}

/// DT = Vx
pub fn loads(cpu: &mut Cpu, x: u8) {
    cpu.timers.delay.set(cpu.v[x as usize]);
}

/// ST = Vx
pub fn ld(cpu: &mut Cpu, x: u8) {
    cpu.timers.sound.set(cpu.v[x as usize]);
}

#[cfg(test)]
mod test_operations {
    use super::*;
    use crate::config::Config;
    use crate::constants::MEMORY_SIZE;

    fn cpu() -> Cpu {
        Cpu::new(&Config {
            seed: Some(0x8),
            ..Config::default()
        })
    }

    #[test]
    fn test_00e0_cls() {
        let mut cpu = cpu();
        cpu.display.set(0, 0, true);
        cpu.display.set(63, 31, true);
        cpu.execute(0x00E0).unwrap();
        assert!(!cpu.display.get(0, 0));
        assert!(!cpu.display.get(63, 31));
    }

    #[test]
    fn test_2nnn_00ee_call_and_return() {
        let mut cpu = cpu();
        cpu.pc = 0x111;
        cpu.execute(0x2123).unwrap();
        assert_eq!(cpu.stack, vec![0x111]);
        assert_eq!(cpu.pc, 0x123);

        cpu.execute(0x00EE).unwrap();
        assert_eq!(cpu.pc, 0x111);
        assert!(cpu.stack.is_empty());
    }

    #[test]
    fn test_00ee_stack_underflow() {
        let mut cpu = cpu();
        match cpu.execute(0x00EE) {
            Err(Error::StackUnderflow) => (),
            other => panic!("expected StackUnderflow, got {:?}", other),
        }
        assert_eq!(cpu.pc, 0x200);
    }

    #[test]
    fn test_stack_is_deeper_than_16() {
        let mut cpu = cpu();
        for _ in 0..32 {
            cpu.execute(0x2300).unwrap();
        }
        assert_eq!(cpu.stack.len(), 32);
    }

    #[test]
    fn test_1nnn_jp() {
        let mut cpu = cpu();
        cpu.execute(0x1BCD).unwrap();
        assert_eq!(cpu.pc, 0xBCD);
        cpu.execute(0x1200).unwrap();
        assert_eq!(cpu.pc, 0x200);
    }

    #[test]
    fn test_6xkk_ld() {
        let mut cpu = cpu();
        cpu.execute(0x6111).unwrap();
        assert_eq!(cpu.v[0x1], 0x11);
        cpu.execute(0x6A22).unwrap();
        assert_eq!(cpu.v[0xA], 0x22);
    }

    #[test]
    fn test_7xkk_add() {
        let mut cpu = cpu();
        cpu.v[0x1] = 0x71;
        cpu.execute(0x7111).unwrap();
        assert_eq!(cpu.v[0x1], 0x82);
    }

    #[test]
    fn test_7xkk_add_wraps_without_flag() {
        let mut cpu = cpu();
        cpu.v[0x1] = 250;
        cpu.v[0xF] = 0xA;
        cpu.execute(0x7109).unwrap();
        assert_eq!(cpu.v[0x1], 3);
        assert_eq!(cpu.v[0xF], 0xA);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut cpu = cpu();
        cpu.v[0x2] = 0x1;
        cpu.execute(0x8120).unwrap();
        assert_eq!(cpu.v[0x1], 0x1);
        assert_eq!(cpu.v[0x2], 0x1);
        assert_eq!(cpu.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy1_8xy2_8xy3_logic() {
        let mut cpu = cpu();
        cpu.v[0x1] = 0x6;
        cpu.v[0x2] = 0x3;
        cpu.execute(0x8121).unwrap();
        assert_eq!(cpu.v[0x1], 0x7);

        cpu.v[0x1] = 0x6;
        cpu.execute(0x8122).unwrap();
        assert_eq!(cpu.v[0x1], 0x2);

        cpu.v[0x1] = 0x6;
        cpu.execute(0x8123).unwrap();
        assert_eq!(cpu.v[0x1], 0x5);
    }

    #[test]
    fn test_8xy4_add_with_carry() {
        let mut cpu = cpu();
        cpu.v[0x1] = 250;
        cpu.v[0x2] = 9;
        cpu.execute(0x8124).unwrap();
        assert_eq!(cpu.v[0x1], 3);
        assert_eq!(cpu.v[0xF], 1);

        cpu.v[0x1] = 0x5;
        cpu.v[0x2] = 0x2;
        cpu.execute(0x8124).unwrap();
        assert_eq!(cpu.v[0x1], 0x7);
        assert_eq!(cpu.v[0xF], 0);
    }

    #[test]
    fn test_8xy5_sub_with_borrow() {
        let mut cpu = cpu();
        cpu.v[0x1] = 12;
        cpu.v[0x2] = 7;
        cpu.execute(0x8125).unwrap();
        assert_eq!(cpu.v[0x1], 5);
        assert_eq!(cpu.v[0xF], 1);

        cpu.v[0x1] = 5;
        cpu.v[0x2] = 9;
        cpu.execute(0x8125).unwrap();
        assert_eq!(cpu.v[0x1], 252);
        assert_eq!(cpu.v[0xF], 0);

        // equal operands don't borrow
        cpu.v[0x1] = 9;
        cpu.execute(0x8125).unwrap();
        assert_eq!(cpu.v[0x1], 0);
        assert_eq!(cpu.v[0xF], 1);
    }

    #[test]
    fn test_8xy6_shr_copies_vy() {
        let mut cpu = cpu();
        cpu.v[0x0] = 0xFF;
        cpu.v[0x1] = 0x11;
        cpu.execute(0x8016).unwrap();
        assert_eq!(cpu.v[0x0], 0x11 >> 1);
        assert_eq!(cpu.v[0x1], 0x11);
        assert_eq!(cpu.v[0xF], 1);

        cpu.v[0x1] = 0x10;
        cpu.execute(0x8016).unwrap();
        assert_eq!(cpu.v[0x0], 0x08);
        assert_eq!(cpu.v[0xF], 0);
    }

    #[test]
    fn test_8xye_shl_copies_vy() {
        let mut cpu = cpu();
        cpu.v[0x1] = 0x82;
        cpu.execute(0x801E).unwrap();
        assert_eq!(cpu.v[0x0], 0x04);
        assert_eq!(cpu.v[0xF], 1);

        cpu.v[0x1] = 0x41;
        cpu.execute(0x801E).unwrap();
        assert_eq!(cpu.v[0x0], 0x82);
        assert_eq!(cpu.v[0xF], 0);
    }

    #[test]
    fn test_annn_ld() {
        let mut cpu = cpu();
        cpu.execute(0xA2C5).unwrap();
        assert_eq!(cpu.i, 0x2C5);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut cpu = cpu();
        cpu.v[0x0] = 0x12;
        cpu.execute(0xB300).unwrap();
        assert_eq!(cpu.pc, 0x312);
    }

    #[test]
    fn test_cxkk_rand_is_masked() {
        let mut cpu = cpu();
        for _ in 0..64 {
            cpu.execute(0xC10F).unwrap();
            assert_eq!(cpu.v[0x1] & 0xF0, 0);
        }
        cpu.execute(0xC100).unwrap();
        assert_eq!(cpu.v[0x1], 0);
    }

    #[test]
    fn test_dxyn_draw_and_collide() {
        let mut cpu = cpu();
        cpu.memory.load_program(&[0b1010_0001]).unwrap();
        cpu.i = 0x200;
        cpu.v[0x1] = 10;
        cpu.v[0x2] = 4;

        cpu.execute(0xD121).unwrap();
        let row: Vec<bool> = (10..18).map(|x| cpu.display.get(x, 4)).collect();
        assert_eq!(row, [true, false, true, false, false, false, false, true]);
        assert!(!cpu.display.get(9, 4));
        assert!(!cpu.display.get(18, 4));
        assert_eq!(cpu.v[0xF], 0);

        cpu.execute(0xD121).unwrap();
        assert!((10..18).all(|x| !cpu.display.get(x, 4)));
        assert_eq!(cpu.v[0xF], 1);
    }

    #[test]
    fn test_dxyn_draws_font() {
        let mut cpu = cpu();
        // sprite for 0 lives at 0x50
        cpu.i = 0x50;
        cpu.execute(0xD005).unwrap();
        let rows: Vec<Vec<bool>> = (0..5)
            .map(|y| (0..4).map(|x| cpu.display.get(x, y)).collect())
            .collect();
        assert_eq!(rows[0], [true, true, true, true]);
        assert_eq!(rows[2], [true, false, false, true]);
        assert_eq!(rows[4], [true, true, true, true]);
    }

    #[test]
    fn test_dxyn_clips_instead_of_wrapping() {
        let mut cpu = cpu();
        cpu.memory.load_program(&[0xFF, 0xFF]).unwrap();
        cpu.i = 0x200;
        cpu.v[0x1] = 60;
        cpu.v[0x2] = 31;
        cpu.execute(0xD122).unwrap();
        assert!((60..64).all(|x| cpu.display.get(x, 31)));
        assert!((0..4).all(|x| !cpu.display.get(x, 31) && !cpu.display.get(x, 0)));
        assert!(!cpu.display.get(60, 0));
    }

    #[test]
    fn test_dxyn_wraps_starting_position() {
        let mut cpu = cpu();
        cpu.memory.load_program(&[0x80]).unwrap();
        cpu.i = 0x200;
        cpu.v[0x1] = 64 + 3;
        cpu.v[0x2] = 32 + 2;
        cpu.execute(0xD121).unwrap();
        assert!(cpu.display.get(3, 2));
    }

    #[test]
    fn test_dxyn_sprite_out_of_bounds() {
        let mut cpu = cpu();
        cpu.i = MEMORY_SIZE as u16 - 1;
        match cpu.execute(0xD002) {
            Err(Error::AddressOutOfBounds(address)) => assert_eq!(address, MEMORY_SIZE),
            other => panic!("expected AddressOutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_dxyn_out_of_bounds_leaves_display_untouched() {
        let mut cpu = cpu();
        cpu.memory.load_program(&[0xFF; MEMORY_SIZE - 0x200]).unwrap();
        cpu.i = MEMORY_SIZE as u16 - 1;
        cpu.v[0xF] = 0x7;
        assert!(cpu.execute(0xD002).is_err());
        assert!((0..8).all(|x| !cpu.display.get(x, 0) && !cpu.display.get(x, 1)));
        assert_eq!(cpu.v[0xF], 0x7);
        assert!(!cpu.display.take_draw_flag());
    }

    #[test]
    fn test_dxyn_rows_clipped_at_the_bottom_are_not_read() {
        let mut cpu = cpu();
        cpu.memory.load_program(&[0xFF; MEMORY_SIZE - 0x200]).unwrap();
        // the second row would be past the end of memory, but also off screen
        cpu.i = MEMORY_SIZE as u16 - 1;
        cpu.v[0x1] = 31;
        cpu.execute(0xD012).unwrap();
        assert!((0..8).all(|x| cpu.display.get(x, 31)));
    }

    #[test]
    fn test_fx07_fx15_delay_timer() {
        let mut cpu = cpu();
        cpu.v[0x1] = 0xF;
        cpu.execute(0xF115).unwrap();
        assert_eq!(cpu.timers.delay.get(), 0xF);

        cpu.timers.delay.tick();
        cpu.execute(0xF207).unwrap();
        assert_eq!(cpu.v[0x2], 0xE);
    }

    #[test]
    fn test_fx18_sound_timer() {
        let mut cpu = cpu();
        cpu.v[0x1] = 0xF;
        cpu.execute(0xF118).unwrap();
        assert_eq!(cpu.timers.sound.get(), 0xF);
        assert_eq!(cpu.timers.delay.get(), 0x0);
    }
}
