//! A typed vector mirrored between RAM and a wgpu buffer.

use crate::context::Context;
use bytemuck::Pod;

/// A vector of elements kept on RAM and uploaded to the GPU on demand.
///
/// Construction never touches the GPU, so geometry can be built (and
/// tested) without a context; [`upload`](GpuVec::upload) creates or updates
/// the wgpu buffer the first time a frame actually needs it.
pub struct GpuVec<T: Pod> {
    data: Vec<T>,
    usage: wgpu::BufferUsages,
    buffer: Option<wgpu::Buffer>,
    dirty: bool,
}

impl<T: Pod> GpuVec<T> {
    /// Creates a new vector that has not been uploaded yet.
    pub fn new(data: Vec<T>, usage: wgpu::BufferUsages) -> GpuVec<T> {
        GpuVec {
            data,
            usage,
            buffer: None,
            dirty: true,
        }
    }

    /// The number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Is this vector empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Immutable access to the RAM copy.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable access to the RAM copy; marks the GPU copy as stale.
    #[inline]
    pub fn data_mut(&mut self) -> &mut Vec<T> {
        self.dirty = true;
        &mut self.data
    }

    /// The wgpu buffer, if it has been uploaded.
    #[inline]
    pub fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }

    /// Whether the GPU copy is missing or stale.
    #[inline]
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Creates or refreshes the GPU copy. No-op while clean.
    pub fn upload(&mut self) {
        if !self.dirty || self.data.is_empty() {
            return;
        }

        let ctxt = Context::get();
        let bytes: &[u8] = bytemuck::cast_slice(&self.data);

        match &self.buffer {
            Some(buffer) if bytes.len() as u64 <= buffer.size() => {
                ctxt.write_buffer(buffer, 0, bytes);
            }
            _ => {
                self.buffer = Some(ctxt.create_buffer_init(
                    Some("gpu_vec"),
                    bytes,
                    self.usage | wgpu::BufferUsages::COPY_DST,
                ));
            }
        }

        self.dirty = false;
    }

    /// Drops the GPU copy, keeping the RAM data.
    pub fn unload(&mut self) {
        self.buffer = None;
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_stays_on_ram() {
        let v = GpuVec::new(vec![1.0f32, 2.0, 3.0], wgpu::BufferUsages::VERTEX);
        assert_eq!(v.len(), 3);
        assert!(v.buffer().is_none());
        assert!(v.dirty());
    }

    #[test]
    fn mutation_marks_the_vector_dirty() {
        let mut v = GpuVec::new(vec![0u32; 4], wgpu::BufferUsages::INDEX);
        v.data_mut().push(7);
        assert!(v.dirty());
        assert_eq!(v.len(), 5);
    }
}
