// src/wgpu_utils/uniform_buffer.rs
use std::marker::PhantomData;

/// Typed uniform buffer that remembers the last bytes it wrote.
///
/// Actors and the camera update their uniforms every frame, but most frames
/// change nothing; those writes are dropped before they reach the queue.
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    last_written: Option<Vec<u8>>,
    content: PhantomData<Content>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    /// Buffer with undefined content until the first [`Self::update_content`]
    pub fn new(device: &wgpu::Device) -> Self {
        Self::create(device, None)
    }

    pub fn new_with_data(device: &wgpu::Device, initial_content: &Content) -> Self {
        Self::create(device, Some(initial_content))
    }

    fn create(device: &wgpu::Device, initial: Option<&Content>) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} uniform", short_type_name::<Content>())),
            size: std::mem::size_of::<Content>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: initial.is_some(),
        });

        let last_written = initial.map(|content| {
            let bytes = bytemuck::bytes_of(content);
            buffer
                .slice(..)
                .get_mapped_range_mut()
                .copy_from_slice(bytes);
            buffer.unmap();
            bytes.to_vec()
        });

        Self {
            buffer,
            last_written,
            content: PhantomData,
        }
    }

    /// Queues a write unless `content` matches what the buffer already holds.
    /// Returns whether a write was queued.
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) -> bool {
        let bytes = bytemuck::bytes_of(&content);
        if self.last_written.as_deref() == Some(bytes) {
            return false;
        }
        queue.write_buffer(&self.buffer, 0, bytes);
        self.last_written = Some(bytes.to_vec());
        true
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }
}

/// Last path segment of a type name, for GPU debug labels
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
