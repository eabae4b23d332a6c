pub struct VertexArrayObject {
    id: u32,
}

impl VertexArrayObject {
    pub unsafe fn new() -> Self {
        let mut id = 0;
        gl::GenVertexArrays(1, &mut id);
        Self { id }
    }

    pub unsafe fn bind(vao: &Self) {
        gl::BindVertexArray(vao.id);
    }

    pub unsafe fn unbind() {
        gl::BindVertexArray(0);
    }

    /// Describes a float attribute read from the bound array buffer and enables it
    ///
    /// `stride` and `offset` are in bytes
    pub unsafe fn f32_attrib_format(loc: u32, size: i32, stride: usize, offset: usize) {
        gl::VertexAttribPointer(
            loc,
            size,
            gl::FLOAT,
            gl::FALSE,
            stride as i32,
            offset as *const _,
        );
        gl::EnableVertexAttribArray(loc);
    }

    /// Describes an integer attribute, which reaches the shader without being converted to float
    pub unsafe fn i32_attrib_format(loc: u32, size: i32, stride: usize, offset: usize) {
        gl::VertexAttribIPointer(loc, size, gl::INT, stride as i32, offset as *const _);
        gl::EnableVertexAttribArray(loc);
    }
}

impl Drop for VertexArrayObject {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.id);
        }
    }
}
