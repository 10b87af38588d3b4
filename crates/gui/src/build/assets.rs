//! Background loading of external mesh assets.
//!
//! Asset files are mesh JSON: `{positions, normals, indices, color?}` with
//! flat arrays of floats and u32 indices. Loads run on a worker thread and
//! results come back over a channel; the UI thread only ever polls. A load
//! that exceeds [`LOAD_TIMEOUT`] is failed, and any failure is permanent for
//! the session so the placement keeps its procedural mesh instead of
//! retrying forever.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use glam::Vec3;
use serde::Deserialize;

use super::furniture::DEFAULT_COLOR;
use crate::viewport::mesh::MeshData;
use crate::viewport::picking::Aabb;

pub const LOAD_TIMEOUT: Duration = Duration::from_secs(10);

pub enum AssetStatus {
    /// Request sent to the worker, placeholder mesh in use.
    Loading(Instant),
    Ready(MeshData),
    Failed(String),
}

struct LoadResult {
    key: String,
    outcome: Result<MeshData, String>,
}

/// Registry of external mesh assets keyed by their `asset_ref` string.
pub struct AssetLibrary {
    statuses: HashMap<String, AssetStatus>,
    requests: Sender<(String, PathBuf)>,
    results: Receiver<LoadResult>,
    version: u64,
    _worker: JoinHandle<()>,
}

impl Default for AssetLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetLibrary {
    pub fn new() -> Self {
        let (req_tx, req_rx) = mpsc::channel::<(String, PathBuf)>();
        let (res_tx, res_rx) = mpsc::channel::<LoadResult>();
        let worker = thread::spawn(move || worker_loop(req_rx, res_tx));
        Self {
            statuses: HashMap::new(),
            requests: req_tx,
            results: res_rx,
            version: 0,
            _worker: worker,
        }
    }

    /// Queue a load for `asset_ref` unless it is already tracked. Failed
    /// entries stay failed; they are never re-requested.
    pub fn request(&mut self, asset_ref: &str) {
        if self.statuses.contains_key(asset_ref) {
            return;
        }
        tracing::debug!("requesting asset '{}'", asset_ref);
        self.statuses
            .insert(asset_ref.to_string(), AssetStatus::Loading(Instant::now()));
        let send = self
            .requests
            .send((asset_ref.to_string(), PathBuf::from(asset_ref)));
        if send.is_err() {
            self.statuses.insert(
                asset_ref.to_string(),
                AssetStatus::Failed("asset worker stopped".into()),
            );
        }
    }

    /// Drain finished loads and expire stale ones. Returns true when any
    /// status changed; the version counter moves with it so mesh caches
    /// know to rebuild.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(result) = self.results.try_recv() {
            changed |= self.apply(result);
        }
        changed |= self.expire_stale();
        if changed {
            self.version += 1;
        }
        changed
    }

    /// Block until nothing is loading. Tests and one-shot exports use this;
    /// the frame loop never does.
    pub fn finish(&mut self) {
        while self.pending() > 0 {
            match self.results.recv_timeout(Duration::from_millis(50)) {
                Ok(result) => {
                    if self.apply(result) {
                        self.version += 1;
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    for status in self.statuses.values_mut() {
                        if matches!(status, AssetStatus::Loading(_)) {
                            *status = AssetStatus::Failed("asset worker stopped".into());
                        }
                    }
                    self.version += 1;
                    break;
                }
            }
            if self.expire_stale() {
                self.version += 1;
            }
        }
    }

    pub fn status(&self, asset_ref: &str) -> Option<&AssetStatus> {
        self.statuses.get(asset_ref)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn pending(&self) -> usize {
        self.statuses
            .values()
            .filter(|s| matches!(s, AssetStatus::Loading(_)))
            .count()
    }

    fn apply(&mut self, result: LoadResult) -> bool {
        // Only a Loading entry may transition; late results after a timeout
        // are dropped so Failed stays permanent.
        match self.statuses.get(&result.key) {
            Some(AssetStatus::Loading(_)) => {
                let status = match result.outcome {
                    Ok(mesh) => {
                        tracing::info!(
                            "asset '{}' loaded ({} triangles)",
                            result.key,
                            mesh.triangle_count()
                        );
                        AssetStatus::Ready(mesh)
                    }
                    Err(msg) => {
                        tracing::warn!("asset '{}' failed: {}", result.key, msg);
                        AssetStatus::Failed(msg)
                    }
                };
                self.statuses.insert(result.key, status);
                true
            }
            _ => false,
        }
    }

    fn expire_stale(&mut self) -> bool {
        let mut changed = false;
        for (key, status) in self.statuses.iter_mut() {
            if let AssetStatus::Loading(since) = status {
                if since.elapsed() >= LOAD_TIMEOUT {
                    tracing::warn!("asset '{}' timed out", key);
                    *status = AssetStatus::Failed(format!(
                        "timed out after {} s",
                        LOAD_TIMEOUT.as_secs()
                    ));
                    changed = true;
                }
            }
        }
        changed
    }
}

fn worker_loop(requests: Receiver<(String, PathBuf)>, results: Sender<LoadResult>) {
    while let Ok((key, path)) = requests.recv() {
        let outcome = load_mesh_file(&path);
        if results.send(LoadResult { key, outcome }).is_err() {
            break;
        }
    }
}

// ── Mesh JSON ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct MeshAssetFile {
    positions: Vec<f32>,
    #[serde(default)]
    normals: Vec<f32>,
    indices: Vec<u32>,
    #[serde(default)]
    color: Option<[f32; 3]>,
}

fn load_mesh_file(path: &Path) -> Result<MeshData, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("read {}: {}", path.display(), e))?;
    let file: MeshAssetFile =
        serde_json::from_str(&text).map_err(|e| format!("parse {}: {}", path.display(), e))?;
    mesh_from_asset(file)
}

fn mesh_from_asset(file: MeshAssetFile) -> Result<MeshData, String> {
    if file.positions.is_empty() || file.positions.len() % 3 != 0 {
        return Err("positions must be a non-empty multiple of 3 floats".into());
    }
    if !file.positions.iter().all(|v| v.is_finite()) {
        return Err("non-finite position data".into());
    }
    if file.indices.is_empty() || file.indices.len() % 3 != 0 {
        return Err("indices must be a non-empty multiple of 3".into());
    }
    let vertex_count = file.positions.len() / 3;
    if let Some(&bad) = file.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(format!("index {} out of range ({} vertices)", bad, vertex_count));
    }
    if !file.normals.is_empty() && file.normals.len() != file.positions.len() {
        return Err("normals length must match positions".into());
    }

    let color = file.color.unwrap_or(DEFAULT_COLOR);
    let mut mesh = MeshData::default();

    if file.normals.is_empty() {
        // No normals supplied: de-index into flat-shaded triangles with a
        // facet normal each.
        for tri in file.indices.chunks_exact(3) {
            let p: Vec<Vec3> = tri
                .iter()
                .map(|&i| {
                    let base = i as usize * 3;
                    Vec3::new(
                        file.positions[base],
                        file.positions[base + 1],
                        file.positions[base + 2],
                    )
                })
                .collect();
            let normal = (p[1] - p[0]).cross(p[2] - p[0]).normalize_or_zero();
            let base = mesh.vertex_count() as u32;
            for v in &p {
                mesh.vertices.extend_from_slice(&[
                    v.x, v.y, v.z, normal.x, normal.y, normal.z, color[0], color[1], color[2],
                ]);
            }
            mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
        }
    } else {
        for i in 0..vertex_count {
            let base = i * 3;
            mesh.vertices.extend_from_slice(&[
                file.positions[base],
                file.positions[base + 1],
                file.positions[base + 2],
                file.normals[base],
                file.normals[base + 1],
                file.normals[base + 2],
                color[0],
                color[1],
                color[2],
            ]);
        }
        mesh.indices = file.indices;
    }

    Ok(mesh)
}

/// Re-fit a loaded asset into the item's dimension box: per-axis scale to
/// the target extents, footprint centered on the origin, base on y = 0.
/// Catalog dimensions stay authoritative for clamping and overlap no matter
/// what units the asset was modeled in.
pub fn fit_to_dims(mesh: &MeshData, dims: [f32; 3]) -> MeshData {
    let bb = Aabb::from_mesh(mesh);
    let extent = bb.max - bb.min;
    let center = bb.center();
    let mut scale = Vec3::ONE;
    for axis in 0..3 {
        if extent[axis] > 1e-6 {
            scale[axis] = dims[axis] / extent[axis];
        }
    }

    let mut vertices = Vec::with_capacity(mesh.vertices.len());
    for v in mesh.vertices.chunks_exact(9) {
        let p = Vec3::new(
            (v[0] - center.x) * scale.x,
            (v[1] - bb.min.y) * scale.y,
            (v[2] - center.z) * scale.z,
        );
        // Inverse-transpose of a diagonal scale is the reciprocal diagonal
        let n = Vec3::new(v[3] / scale.x, v[4] / scale.y, v[5] / scale.z).normalize_or_zero();
        vertices.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, v[6], v[7], v[8]]);
    }
    MeshData {
        vertices,
        indices: mesh.indices.clone(),
    }
}
