use core::cmp::Ordering;

use orrery_geom::Vec3;

use crate::Camera;

/// Painter's ordering for the draw list: background items first, then far to near.
///
/// Sorting only happens when the camera has moved since the previous call;
/// turning in place leaves every distance unchanged.
#[derive(Clone, Debug, Default)]
pub struct RenderOrderer {
    last_position: Option<Vec3>,
    // (background, distance, index before sorting), reused across frames
    keys: Vec<(bool, f64, usize)>,
}

impl RenderOrderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the next [`reorder`](Self::reorder) to sort, e.g. after the draw list changed.
    pub fn invalidate(&mut self) {
        self.last_position = None;
    }

    /// Sorts `items` in place. `key` yields `(is_background, world_position)`.
    ///
    /// Equal keys keep their previous relative order. Once the key buffer has
    /// grown to the list length no further allocation happens.
    /// Returns whether a sort ran.
    pub fn reorder<T, K>(&mut self, items: &mut [T], camera: &Camera, mut key: K) -> bool
    where
        K: FnMut(&T) -> (bool, Vec3),
    {
        let eye = camera.position();
        if self.last_position == Some(eye) {
            return false;
        }
        self.keys.clear();
        self.keys.extend(items.iter().enumerate().map(|(i, item)| {
            let (background, position) = key(item);
            (background, eye.distance(position), i)
        }));
        self.keys.sort_unstable_by(|a, b| match b.0.cmp(&a.0) {
            Ordering::Equal => b.1.total_cmp(&a.1).then(a.2.cmp(&b.2)),
            other => other,
        });
        permute(items, &mut self.keys);
        self.last_position = Some(eye);
        log::trace!(target: "scene", "reordered {} drawables", items.len());
        true
    }
}

/// Moves `items[keys[j].2]` to slot `j` by walking permutation cycles with swaps.
/// Leaves every `keys[j].2 == j`.
fn permute<T>(items: &mut [T], keys: &mut [(bool, f64, usize)]) {
    for start in 0..keys.len() {
        let mut j = start;
        while keys[j].2 != j {
            let src = keys[j].2;
            keys[j].2 = j;
            if src == start {
                break;
            }
            items.swap(j, src);
            j = src;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_geom::Euler;

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Item {
        id: u32,
        bg: bool,
        at: Vec3,
    }

    fn item(id: u32, bg: bool, x: f64) -> Item {
        Item {
            id,
            bg,
            at: Vec3::new(x, 0.0, 0.0),
        }
    }

    fn ids(items: &[Item]) -> Vec<u32> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn background_first_then_far_to_near() {
        let cam = Camera::default();
        let mut items = vec![item(0, false, 5.0), item(1, true, 1.0), item(2, false, 50.0), item(3, false, -20.0)];
        let mut orderer = RenderOrderer::new();
        assert!(orderer.reorder(&mut items, &cam, |i| (i.bg, i.at)));
        assert_eq!(ids(&items), [1, 2, 3, 0]);
    }

    #[test]
    fn rotation_only_frame_is_skipped() {
        let mut cam = Camera::default();
        let mut items = vec![item(0, false, 1.0), item(1, false, 2.0)];
        let mut orderer = RenderOrderer::new();
        assert!(orderer.reorder(&mut items, &cam, |i| (i.bg, i.at)));
        cam.mouse_move(45.0, 10.0);
        // swap by hand; a skipped frame must leave it alone
        items.swap(0, 1);
        assert!(!orderer.reorder(&mut items, &cam, |i| (i.bg, i.at)));
        assert_eq!(ids(&items), [0, 1]);
        cam.move_by(1.0);
        assert!(orderer.reorder(&mut items, &cam, |i| (i.bg, i.at)));
        assert_eq!(ids(&items), [1, 0]);
    }

    #[test]
    fn key_buffer_is_reused_between_sorts() {
        let mut cam = Camera::default();
        let mut items: Vec<Item> = (0..32).map(|i| item(i, i % 5 == 0, (i as f64 * 7.3) % 11.0)).collect();
        let mut orderer = RenderOrderer::new();
        orderer.reorder(&mut items, &cam, |i| (i.bg, i.at));
        let buffer = orderer.keys.as_ptr();
        let capacity = orderer.keys.capacity();
        for step in 0..5 {
            cam.move_by(1.0 + step as f64);
            assert!(orderer.reorder(&mut items, &cam, |i| (i.bg, i.at)));
            assert_eq!(orderer.keys.as_ptr(), buffer);
            assert_eq!(orderer.keys.capacity(), capacity);
        }
    }

    #[test]
    fn matches_a_stable_sort() {
        let cam = Camera::new(Vec3::new(2.0, 0.0, 0.0), Euler::ZERO);
        let xs = [4.0, -1.0, 0.0, 4.0, 9.0, 2.0, -6.0, 0.0, 9.0, 3.0];
        let mut items: Vec<Item> = xs.iter().enumerate().map(|(i, &x)| item(i as u32, i == 6, x)).collect();
        let mut expected = items.clone();
        expected.sort_by(|a, b| {
            b.bg.cmp(&a.bg)
                .then(cam.position().distance(b.at).total_cmp(&cam.position().distance(a.at)))
        });
        RenderOrderer::new().reorder(&mut items, &cam, |i| (i.bg, i.at));
        assert_eq!(ids(&items), ids(&expected));
    }

    #[test]
    fn ties_keep_previous_order() {
        let cam = Camera::new(Vec3::ZERO, Euler::ZERO);
        let mut items = vec![item(7, false, 3.0), item(4, false, -3.0), item(9, false, 3.0)];
        let mut orderer = RenderOrderer::new();
        orderer.reorder(&mut items, &cam, |i| (i.bg, i.at));
        assert_eq!(ids(&items), [7, 4, 9]);
        orderer.invalidate();
        orderer.reorder(&mut items, &cam, |i| (i.bg, i.at));
        assert_eq!(ids(&items), [7, 4, 9]);
    }
}
