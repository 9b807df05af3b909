//! Block stack layout

use glam::Vec2;

use super::state::Block;
use crate::consts::*;
use crate::tuning::BlockSpec;

/// The default tower: `STACK_COLUMNS` columns of `STACK_ROWS` square blocks
/// standing on the ground, capped with a thin lintel spanning all columns.
pub fn default_stack(ground_height: f32) -> Vec<BlockSpec> {
    let mut specs = Vec::with_capacity((STACK_COLUMNS * STACK_ROWS + 1) as usize);

    for col in 0..STACK_COLUMNS {
        let x = STACK_LEFT + col as f32 * (BLOCK_SIZE + STACK_GAP);
        for row in 0..STACK_ROWS {
            let y = ground_height + row as f32 * BLOCK_SIZE;
            specs.push(BlockSpec::new(x, y, BLOCK_SIZE, BLOCK_SIZE));
        }
    }

    let span = STACK_COLUMNS as f32 * (BLOCK_SIZE + STACK_GAP) - STACK_GAP;
    let top = ground_height + STACK_ROWS as f32 * BLOCK_SIZE;
    specs.push(BlockSpec::new(STACK_LEFT, top, span, BLOCK_SIZE / 3.0));

    specs
}

/// Instantiate blocks from specs, numbering them from `first_id`
pub fn build_blocks(specs: &[BlockSpec], first_id: u32) -> Vec<Block> {
    specs
        .iter()
        .zip(first_id..)
        .map(|(spec, id)| {
            Block::new(
                id,
                Vec2::new(spec.x, spec.y),
                Vec2::new(spec.width, spec.height),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stack_rests_on_ground() {
        let specs = default_stack(GROUND_HEIGHT);
        assert_eq!(specs.len(), (STACK_COLUMNS * STACK_ROWS + 1) as usize);
        let lowest = specs.iter().map(|s| s.y).fold(f32::INFINITY, f32::min);
        assert_eq!(lowest, GROUND_HEIGHT);
        assert!(specs.iter().all(|s| s.x + s.width <= WORLD_WIDTH));
    }

    #[test]
    fn test_build_blocks_ids() {
        let specs = default_stack(GROUND_HEIGHT);
        let blocks = build_blocks(&specs, 10);
        assert_eq!(blocks.first().map(|b| b.id), Some(10));
        assert_eq!(blocks.last().map(|b| b.id), Some(10 + specs.len() as u32 - 1));
        assert!(blocks.iter().all(|b| b.alive && !b.falling));
    }
}
