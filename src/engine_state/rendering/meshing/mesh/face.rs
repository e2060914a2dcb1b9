use crate::engine_state::voxels::block::block_side::BlockSide;

/// One corner of a unit voxel face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceCorner {
    /// Offset from the voxel's minimum corner, each component `0` or `1`
    pub pos: [u8; 3],
    /// Tile-relative texture coordinate, each component `0` or `1`
    pub uv: [u8; 2],
}

/// The four corners of a voxel face, wound so that the index pattern
/// `0, 1, 2, 2, 1, 3` yields two counter-clockwise triangles seen from outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Which side of the voxel this face represents
    pub block_side: BlockSide,
    /// Corners in emission order
    pub corners: [FaceCorner; 4],
}

const fn corner(pos: [u8; 3], uv: [u8; 2]) -> FaceCorner {
    FaceCorner { pos, uv }
}

/// The six faces of a unit voxel, indexed by `BlockSide as usize`.
pub static FACES: [Face; 6] = [
    Face {
        block_side: BlockSide::LEFT,
        corners: [
            corner([0, 1, 0], [0, 1]),
            corner([0, 0, 0], [0, 0]),
            corner([0, 1, 1], [1, 1]),
            corner([0, 0, 1], [1, 0]),
        ],
    },
    Face {
        block_side: BlockSide::RIGHT,
        corners: [
            corner([1, 1, 1], [0, 1]),
            corner([1, 0, 1], [0, 0]),
            corner([1, 1, 0], [1, 1]),
            corner([1, 0, 0], [1, 0]),
        ],
    },
    Face {
        block_side: BlockSide::BOTTOM,
        corners: [
            corner([1, 0, 1], [1, 0]),
            corner([0, 0, 1], [0, 0]),
            corner([1, 0, 0], [1, 1]),
            corner([0, 0, 0], [0, 1]),
        ],
    },
    Face {
        block_side: BlockSide::TOP,
        corners: [
            corner([0, 1, 1], [1, 1]),
            corner([1, 1, 1], [0, 1]),
            corner([0, 1, 0], [1, 0]),
            corner([1, 1, 0], [0, 0]),
        ],
    },
    Face {
        block_side: BlockSide::BACK,
        corners: [
            corner([1, 0, 0], [0, 0]),
            corner([0, 0, 0], [1, 0]),
            corner([1, 1, 0], [0, 1]),
            corner([0, 1, 0], [1, 1]),
        ],
    },
    Face {
        block_side: BlockSide::FRONT,
        corners: [
            corner([0, 0, 1], [0, 0]),
            corner([1, 0, 1], [1, 0]),
            corner([0, 1, 1], [0, 1]),
            corner([1, 1, 1], [1, 1]),
        ],
    },
];

/// Index pattern for one quad, relative to its first vertex.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 1, 3];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faces_indexed_by_side() {
        for side in BlockSide::all() {
            assert_eq!(FACES[side as usize].block_side, side);
        }
    }

    #[test]
    fn test_corners_lie_on_face_plane() {
        for face in FACES.iter() {
            let axis = face.block_side.axis();
            let plane = if face.block_side.normal()[axis] > 0 { 1 } else { 0 };
            for c in face.corners {
                assert_eq!(c.pos[axis], plane, "{:?}", face.block_side);
            }
        }
    }

    #[test]
    fn test_triangles_face_outward() {
        for face in FACES.iter() {
            let p = |i: usize| {
                let c = face.corners[i].pos;
                [c[0] as i32, c[1] as i32, c[2] as i32]
            };
            let (a, b, c) = (p(0), p(1), p(2));
            let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let ac = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let cross = [
                ab[1] * ac[2] - ab[2] * ac[1],
                ab[2] * ac[0] - ab[0] * ac[2],
                ab[0] * ac[1] - ab[1] * ac[0],
            ];
            let n = face.block_side.normal();
            assert_eq!(cross, [n.x, n.y, n.z], "{:?}", face.block_side);
        }
    }
}
