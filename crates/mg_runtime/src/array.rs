// crates/mg_runtime/src/array.rs

//! 多维数组与核函数视图
//!
//! 提供求解器所需的拥有型多维数组（[`Array1D`]/[`Array3D`]/[`Array4D`]）
//! 以及传入核函数的轻量视图（[`View1D`]/[`View3D`]/[`View4D`]）。
//!
//! # 步距约定
//!
//! 四维数组固定按 `(n, k, j, i)` 排布，i 为最快变化维：
//!
//! ```text
//! flat = ((n * nk + k) * nj + j) * ni + i
//! ```
//!
//! 三维数组按 `(k, j, i)` 同理。所有热点核函数都经由该约定访问。
//!
//! # 视图与安全契约
//!
//! 视图是擦除生命周期的裸指针包装（Kokkos View 风格），`Copy`、
//! 可被 par_for 闭包按值捕获。安全性依赖两条契约：
//!
//! 1. 视图仅在其来源数组存活且未重分配期间使用（数组在初始化时一次性
//!    分配、此后只读写元素，见 mg_physics 的 DataBlock 生命周期）；
//! 2. 同一 par_for 内各迭代的写集合互不相交（单写者纪律）。
//!
//! 越界访问在 debug 构建下触发断言。

use bytemuck::Pod;

// ============================================================
// 一维
// ============================================================

/// 拥有型一维数组
#[derive(Debug, Clone)]
pub struct Array1D<T: Pod = crate::Real> {
    data: Vec<T>,
    len: usize,
}

impl<T: Pod> Array1D<T> {
    /// 创建零初始化数组
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![T::zeroed(); len],
            len,
        }
    }

    /// 由既有数据构建
    pub fn from_vec(data: Vec<T>) -> Self {
        let len = data.len();
        Self { data, len }
    }

    /// 长度
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 读取元素
    #[inline]
    pub fn get(&self, i: usize) -> T {
        debug_assert!(i < self.len);
        self.data[i]
    }

    /// 写入元素
    #[inline]
    pub fn set(&mut self, i: usize, v: T) {
        debug_assert!(i < self.len);
        self.data[i] = v;
    }

    /// 只读切片
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// 核函数视图
    #[inline]
    pub fn view(&mut self) -> View1D<T> {
        View1D {
            ptr: self.data.as_mut_ptr(),
            len: self.len,
        }
    }
}

/// 一维核函数视图
#[derive(Debug, Clone, Copy)]
pub struct View1D<T: Pod = crate::Real> {
    ptr: *mut T,
    len: usize,
}

unsafe impl<T: Pod + Send> Send for View1D<T> {}
unsafe impl<T: Pod + Sync> Sync for View1D<T> {}

impl<T: Pod> View1D<T> {
    /// 读取元素
    #[inline]
    pub fn get(&self, i: usize) -> T {
        debug_assert!(i < self.len);
        unsafe { self.ptr.add(i).read() }
    }

    /// 写入元素
    #[inline]
    pub fn set(&self, i: usize, v: T) {
        debug_assert!(i < self.len);
        unsafe { self.ptr.add(i).write(v) }
    }

    /// 长度
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

// ============================================================
// 三维
// ============================================================

/// 拥有型三维数组，`(k, j, i)` 排布
#[derive(Debug, Clone)]
pub struct Array3D<T: Pod = crate::Real> {
    data: Vec<T>,
    nk: usize,
    nj: usize,
    ni: usize,
}

impl<T: Pod> Array3D<T> {
    /// 创建零初始化数组
    pub fn new(nk: usize, nj: usize, ni: usize) -> Self {
        Self {
            data: vec![T::zeroed(); nk * nj * ni],
            nk,
            nj,
            ni,
        }
    }

    /// 形状 `(nk, nj, ni)`
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.nk, self.nj, self.ni)
    }

    #[inline]
    fn idx(&self, k: usize, j: usize, i: usize) -> usize {
        debug_assert!(k < self.nk && j < self.nj && i < self.ni);
        (k * self.nj + j) * self.ni + i
    }

    /// 读取元素
    #[inline]
    pub fn get(&self, k: usize, j: usize, i: usize) -> T {
        self.data[self.idx(k, j, i)]
    }

    /// 写入元素
    #[inline]
    pub fn set(&mut self, k: usize, j: usize, i: usize, v: T) {
        let idx = self.idx(k, j, i);
        self.data[idx] = v;
    }

    /// 全体填充
    pub fn fill(&mut self, v: T) {
        self.data.fill(v);
    }

    /// 只读切片
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// 核函数视图
    #[inline]
    pub fn view(&mut self) -> View3D<T> {
        View3D {
            ptr: self.data.as_mut_ptr(),
            nk: self.nk,
            nj: self.nj,
            ni: self.ni,
        }
    }
}

/// 三维核函数视图
#[derive(Debug, Clone, Copy)]
pub struct View3D<T: Pod = crate::Real> {
    ptr: *mut T,
    nk: usize,
    nj: usize,
    ni: usize,
}

unsafe impl<T: Pod + Send> Send for View3D<T> {}
unsafe impl<T: Pod + Sync> Sync for View3D<T> {}

impl<T: Pod> View3D<T> {
    #[inline]
    fn idx(&self, k: usize, j: usize, i: usize) -> usize {
        debug_assert!(k < self.nk && j < self.nj && i < self.ni);
        (k * self.nj + j) * self.ni + i
    }

    /// 读取元素
    #[inline]
    pub fn get(&self, k: usize, j: usize, i: usize) -> T {
        unsafe { self.ptr.add(self.idx(k, j, i)).read() }
    }

    /// 写入元素
    #[inline]
    pub fn set(&self, k: usize, j: usize, i: usize, v: T) {
        unsafe { self.ptr.add(self.idx(k, j, i)).write(v) }
    }
}

// ============================================================
// 四维
// ============================================================

/// 拥有型四维数组，`(n, k, j, i)` 排布
///
/// 求解器的场量容器：n 为物理通道（密度、速度、压强、磁场），
/// `(k, j, i)` 为网格索引。
#[derive(Debug, Clone)]
pub struct Array4D<T: Pod = crate::Real> {
    data: Vec<T>,
    nvar: usize,
    nk: usize,
    nj: usize,
    ni: usize,
}

impl<T: Pod> Array4D<T> {
    /// 创建零初始化数组
    pub fn new(nvar: usize, nk: usize, nj: usize, ni: usize) -> Self {
        Self {
            data: vec![T::zeroed(); nvar * nk * nj * ni],
            nvar,
            nk,
            nj,
            ni,
        }
    }

    /// 形状 `(nvar, nk, nj, ni)`
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        (self.nvar, self.nk, self.nj, self.ni)
    }

    #[inline]
    fn idx(&self, n: usize, k: usize, j: usize, i: usize) -> usize {
        debug_assert!(n < self.nvar && k < self.nk && j < self.nj && i < self.ni);
        ((n * self.nk + k) * self.nj + j) * self.ni + i
    }

    /// 读取元素
    #[inline]
    pub fn get(&self, n: usize, k: usize, j: usize, i: usize) -> T {
        self.data[self.idx(n, k, j, i)]
    }

    /// 写入元素
    #[inline]
    pub fn set(&mut self, n: usize, k: usize, j: usize, i: usize, v: T) {
        let idx = self.idx(n, k, j, i);
        self.data[idx] = v;
    }

    /// 全体填充
    pub fn fill(&mut self, v: T) {
        self.data.fill(v);
    }

    /// 整体复制（形状必须一致）
    pub fn copy_from(&mut self, src: &Self) {
        debug_assert_eq!(self.shape(), src.shape());
        self.data.copy_from_slice(&src.data);
    }

    /// 只读切片
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// 核函数视图
    #[inline]
    pub fn view(&mut self) -> View4D<T> {
        View4D {
            ptr: self.data.as_mut_ptr(),
            nvar: self.nvar,
            nk: self.nk,
            nj: self.nj,
            ni: self.ni,
        }
    }
}

/// 四维核函数视图
#[derive(Debug, Clone, Copy)]
pub struct View4D<T: Pod = crate::Real> {
    ptr: *mut T,
    nvar: usize,
    nk: usize,
    nj: usize,
    ni: usize,
}

unsafe impl<T: Pod + Send> Send for View4D<T> {}
unsafe impl<T: Pod + Sync> Sync for View4D<T> {}

impl<T: Pod> View4D<T> {
    #[inline]
    fn idx(&self, n: usize, k: usize, j: usize, i: usize) -> usize {
        debug_assert!(n < self.nvar && k < self.nk && j < self.nj && i < self.ni);
        ((n * self.nk + k) * self.nj + j) * self.ni + i
    }

    /// 读取元素
    #[inline]
    pub fn get(&self, n: usize, k: usize, j: usize, i: usize) -> T {
        unsafe { self.ptr.add(self.idx(n, k, j, i)).read() }
    }

    /// 写入元素
    #[inline]
    pub fn set(&self, n: usize, k: usize, j: usize, i: usize, v: T) {
        unsafe { self.ptr.add(self.idx(n, k, j, i)).write(v) }
    }

    /// 通道数
    #[inline]
    pub fn nvar(&self) -> usize {
        self.nvar
    }
}

// ============================================================
// 测试
// ============================================================
