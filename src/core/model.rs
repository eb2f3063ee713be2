use super::constants::{MODEL_POSITION, MODEL_SCALE};
use super::mixer::{AnimationClip, Channel, Interpolation, Keyframes, NodePose};
use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("invalid glTF: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("GLB has no binary chunk")]
    MissingBlob,
    #[error("external buffer `{0}` is not supported; embed buffers in the GLB")]
    ExternalBuffer(String),
    #[error("mesh {mesh} primitive {primitive} has no positions")]
    MissingPositions { mesh: usize, primitive: usize },
}

/// Triangle list ready for upload.
#[derive(Clone, Debug, Default)]
pub struct MeshPrimitive {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
}

#[derive(Clone, Debug, Default)]
pub struct ModelNode {
    pub rest: NodePose,
    pub children: Vec<usize>,
    pub mesh: Option<usize>,
}

/// Renderer-neutral contents of a decoded GLB file.
#[derive(Clone, Debug, Default)]
pub struct ModelData {
    pub nodes: Vec<ModelNode>,
    pub roots: Vec<usize>,
    pub meshes: Vec<Vec<MeshPrimitive>>,
    pub clips: Vec<AnimationClip>,
}

impl ModelData {
    pub fn rest_poses(&self) -> Vec<NodePose> {
        self.nodes.iter().map(|n| n.rest).collect()
    }

    /// Model-space matrix of every node for the given local poses.
    ///
    /// Nodes not reachable from a root keep the identity matrix.
    pub fn world_matrices(&self, poses: &[NodePose]) -> Vec<Mat4> {
        let mut out = vec![Mat4::IDENTITY; self.nodes.len()];
        let mut visited = vec![false; self.nodes.len()];
        let mut stack: Vec<(usize, Mat4)> = self
            .roots
            .iter()
            .rev()
            .map(|&r| (r, Mat4::IDENTITY))
            .collect();
        while let Some((idx, parent)) = stack.pop() {
            if idx >= self.nodes.len() || visited[idx] {
                continue;
            }
            visited[idx] = true;
            let pose = poses.get(idx).copied().unwrap_or(self.nodes[idx].rest);
            let world = parent
                * Mat4::from_scale_rotation_translation(
                    pose.scale,
                    pose.rotation,
                    pose.translation,
                );
            out[idx] = world;
            for &child in self.nodes[idx].children.iter().rev() {
                stack.push((child, world));
            }
        }
        out
    }
}

/// Placement of the whole model in the scene for a given spin angle.
pub fn placement_matrix(spin: f32) -> Mat4 {
    Mat4::from_translation(MODEL_POSITION)
        * Mat4::from_rotation_y(spin)
        * Mat4::from_scale(MODEL_SCALE)
}

/// Area-weighted vertex normals for an indexed triangle list.
pub fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let pa = Vec3::from(positions[a]);
        let face = (Vec3::from(positions[b]) - pa).cross(Vec3::from(positions[c]) - pa);
        acc[a] += face;
        acc[b] += face;
        acc[c] += face;
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

/// Decode a binary glTF file.
///
/// Only triangle primitives are kept. Buffers must live in the GLB binary
/// chunk. Animation channels for morph weights are ignored.
pub fn decode_glb(bytes: &[u8]) -> Result<ModelData, ModelError> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let buffers = gltf
        .buffers()
        .map(|b| match b.source() {
            gltf::buffer::Source::Bin => gltf.blob.clone().ok_or(ModelError::MissingBlob),
            gltf::buffer::Source::Uri(uri) => Err(ModelError::ExternalBuffer(uri.to_string())),
        })
        .collect::<Result<Vec<_>, _>>()?;
    let source = |buffer: gltf::Buffer<'_>| buffers.get(buffer.index()).map(|b| b.as_slice());

    let mut meshes = Vec::new();
    for mesh in gltf.meshes() {
        let mut prims = Vec::new();
        for (pi, primitive) in mesh.primitives().enumerate() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            let reader = primitive.reader(source);
            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .ok_or(ModelError::MissingPositions {
                    mesh: mesh.index(),
                    primitive: pi,
                })?
                .collect();
            let indices: Vec<u32> = match reader.read_indices() {
                Some(idx) => idx.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            let normals = match reader.read_normals() {
                Some(n) => n.collect(),
                None => compute_normals(&positions, &indices),
            };
            let base_color = primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();
            prims.push(MeshPrimitive {
                positions,
                normals,
                indices,
                base_color,
            });
        }
        meshes.push(prims);
    }

    let nodes: Vec<ModelNode> = gltf
        .nodes()
        .map(|node| {
            let (t, r, s) = node.transform().decomposed();
            ModelNode {
                rest: NodePose {
                    translation: Vec3::from(t),
                    rotation: Quat::from_array(r),
                    scale: Vec3::from(s),
                },
                children: node.children().map(|c| c.index()).collect(),
                mesh: node.mesh().map(|m| m.index()),
            }
        })
        .collect();

    let roots = match gltf.default_scene().or_else(|| gltf.scenes().next()) {
        Some(scene) => scene.nodes().map(|n| n.index()).collect(),
        None => {
            let mut has_parent = vec![false; nodes.len()];
            for n in &nodes {
                for &c in &n.children {
                    if let Some(slot) = has_parent.get_mut(c) {
                        *slot = true;
                    }
                }
            }
            (0..nodes.len()).filter(|&i| !has_parent[i]).collect()
        }
    };

    let mut clips = Vec::new();
    for anim in gltf.animations() {
        let mut channels: SmallVec<[Channel; 4]> = SmallVec::new();
        for channel in anim.channels() {
            let reader = channel.reader(source);
            let Some(inputs) = reader.read_inputs() else {
                continue;
            };
            let times: Vec<f32> = inputs.collect();
            let (interpolation, cubic) = match channel.sampler().interpolation() {
                gltf::animation::Interpolation::Step => (Interpolation::Step, false),
                gltf::animation::Interpolation::Linear => (Interpolation::Linear, false),
                gltf::animation::Interpolation::CubicSpline => (Interpolation::Linear, true),
            };
            let values = match reader.read_outputs() {
                Some(gltf::animation::util::ReadOutputs::Translations(it)) => {
                    Keyframes::Translation(spline_values(it.map(Vec3::from), cubic))
                }
                Some(gltf::animation::util::ReadOutputs::Rotations(rot)) => {
                    Keyframes::Rotation(spline_values(rot.into_f32().map(Quat::from_array), cubic))
                }
                Some(gltf::animation::util::ReadOutputs::Scales(it)) => {
                    Keyframes::Scale(spline_values(it.map(Vec3::from), cubic))
                }
                _ => continue,
            };
            let parsed = Channel {
                node: channel.target().node().index(),
                interpolation,
                times,
                values,
            };
            if !parsed.has_ordered_times() {
                log::warn!("[model] dropping channel for node {}: bad key times", parsed.node);
                continue;
            }
            channels.push(parsed);
        }
        if !channels.is_empty() {
            clips.push(AnimationClip::new(anim.name().unwrap_or("clip"), channels));
        }
    }

    Ok(ModelData {
        nodes,
        roots,
        meshes,
        clips,
    })
}

// Cubic-spline outputs are stored as (in-tangent, value, out-tangent) triples.
fn spline_values<T>(it: impl Iterator<Item = T>, cubic: bool) -> Vec<T> {
    if cubic {
        it.skip(1).step_by(3).collect()
    } else {
        it.collect()
    }
}
