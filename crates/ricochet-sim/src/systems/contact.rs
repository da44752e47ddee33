//! Contact detection: projectile boxes against damageable boxes.
//!
//! Every overlapping pair is reported through the hit dispatcher, projectiles
//! in ascending entity order and targets in ascending entity order.

use hecs::{Entity, World};

use ricochet_core::components::{Collider, Damageable, Projectile, Transform};
use ricochet_core::FixedVec2;

use crate::error::SimError;
use crate::signals::{HitDispatcher, TickContext};

use super::collect_sorted;

pub fn run(
    ctx: &mut TickContext<'_>,
    dispatcher: &HitDispatcher,
    projectiles: &mut Vec<Entity>,
    targets: &mut Vec<Entity>,
) -> Result<(), SimError> {
    collect_sorted::<Projectile>(ctx.world, projectiles);
    collect_sorted::<Damageable>(ctx.world, targets);

    for &projectile in projectiles.iter() {
        for &target in targets.iter() {
            if target == projectile {
                continue;
            }
            // A listener destroyed the projectile on an earlier target.
            if !ctx.world.contains(projectile) {
                break;
            }
            if overlapping(ctx.world, projectile, target) {
                dispatcher.dispatch(ctx, projectile, target)?;
            }
        }
    }

    Ok(())
}

fn overlapping(world: &World, a: Entity, b: Entity) -> bool {
    let (Some((a_pos, a_box)), Some((b_pos, b_box))) = (placed_box(world, a), placed_box(world, b))
    else {
        return false;
    };
    a_box.overlaps(a_pos, &b_box, b_pos)
}

fn placed_box(world: &World, entity: Entity) -> Option<(FixedVec2, Collider)> {
    let transform = world.get::<&Transform>(entity).ok()?;
    let collider = world.get::<&Collider>(entity).ok()?;
    Some((transform.position, *collider))
}
