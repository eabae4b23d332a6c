use std::mem::size_of;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

impl BufferTarget {
    fn to_gl(self) -> u32 {
        match self {
            Self::Array => gl::ARRAY_BUFFER,
            Self::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// The usage hint given to the driver when the storage is allocated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferUsage {
    /// Written once by the application, read by draw calls
    StaticDraw,
    /// Written and read back by the GPU itself (e.g. transform feedback)
    DynamicCopy,
}

impl BufferUsage {
    fn to_gl(self) -> u32 {
        match self {
            Self::StaticDraw => gl::STATIC_DRAW,
            Self::DynamicCopy => gl::DYNAMIC_COPY,
        }
    }
}

pub struct VertexBufferObject {
    id: u32,
    target: BufferTarget,
    len: usize,
}

impl VertexBufferObject {
    /// Allocates a buffer holding a copy of `data`
    ///
    /// NOTE: after this call the buffer will be bound to `target`
    pub unsafe fn new<T: Copy>(target: BufferTarget, data: &[T], usage: BufferUsage) -> Self {
        let mut id = 0;
        gl::GenBuffers(1, &mut id);
        gl::BindBuffer(target.to_gl(), id);
        gl::BufferData(
            target.to_gl(),
            (data.len() * size_of::<T>()) as isize,
            data.as_ptr() as *const _,
            usage.to_gl(),
        );
        Self {
            id,
            target,
            len: data.len(),
        }
    }

    pub unsafe fn bind(vbo: &Self) {
        gl::BindBuffer(vbo.target.to_gl(), vbo.id);
    }

    pub unsafe fn unbind(target: BufferTarget) {
        gl::BindBuffer(target.to_gl(), 0);
    }

    /// Binds the buffer to the `index`th transform feedback output
    pub unsafe fn bind_feedback(&self, index: u32) {
        gl::BindBufferBase(gl::TRANSFORM_FEEDBACK_BUFFER, index, self.id);
    }

    pub(super) fn handle(&self) -> u32 {
        self.id
    }

    /// Number of elements the buffer was created with
    pub fn len(&self) -> usize {
        self.len
    }
}

impl Drop for VertexBufferObject {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.id);
        }
    }
}
