//! # Log 模块
//!
//! 宿主的诊断输出接收端。
//!
//! ## 设计说明
//!
//! - 每次 `log` 调用输出一行 `"<tag>: <message>"`，以换行结尾
//! - 写入是尽力而为的：任何 IO 错误都被吞掉，调用方永远不会看到失败
//! - 接收端可注入，默认写到进程标准输出；测试使用 [`MemorySink`] 捕获输出
//! - 接收端自身负责串行化，可以从后台线程直接调用

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// 诊断输出接收端
pub trait LogSink: Send + Sync {
    /// 追加一行（实现负责补上换行符）
    fn write_line(&self, line: &str);
}

/// 可在线程间共享的接收端
pub type SharedLogSink = Arc<dyn LogSink>;

/// 格式化一行日志，不做其他任何修饰
pub fn format_log_line(tag: &str, message: &str) -> String {
    format!("{tag}: {message}")
}

/// 默认接收端：进程标准输出
pub fn default_sink() -> SharedLogSink {
    Arc::new(StdoutSink)
}

/// 锁中毒时继续使用内部数据，日志路径上不允许 panic 传播
fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 标准输出接收端
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write_line(&self, line: &str) {
        // stdout 的锁保证单行不被其他线程打断
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }
}

/// 任意 `Write` 目标的接收端（stderr、文件、内存缓冲等）
#[derive(Debug)]
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// 取回内部 writer
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn write_line(&self, line: &str) {
        let mut writer = lock_ignoring_poison(&self.writer);
        let _ = writeln!(writer, "{line}");
        let _ = writer.flush();
    }
}

/// 内存接收端
///
/// 按原样保存写入的文本（含换行符），用于确定性地断言输出。
#[derive(Debug, Default)]
pub struct MemorySink {
    buffer: Mutex<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 目前为止写入的全部文本
    pub fn contents(&self) -> String {
        lock_ignoring_poison(&self.buffer).clone()
    }

    /// 按行拆分（不含换行符）
    pub fn lines(&self) -> Vec<String> {
        lock_ignoring_poison(&self.buffer)
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn clear(&self) {
        lock_ignoring_poison(&self.buffer).clear();
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) {
        let mut buffer = lock_ignoring_poison(&self.buffer);
        buffer.push_str(line);
        buffer.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    /// 永远写失败的 writer
    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_format_is_exact() {
        assert_eq!(format_log_line("INFO", "started"), "INFO: started");
        assert_eq!(format_log_line("", ""), ": ");
        assert_eq!(format_log_line("a:b", " x "), "a:b:  x ");
    }

    #[test]
    fn test_writer_sink_appends_newline() {
        let sink = WriterSink::new(Vec::new());
        sink.write_line(&format_log_line("INFO", "started"));
        sink.write_line(&format_log_line("WARN", "slow frame"));
        let bytes = sink.into_inner();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "INFO: started\nWARN: slow frame\n"
        );
    }

    #[test]
    fn test_broken_writer_is_swallowed() {
        let sink = WriterSink::new(BrokenWriter);
        sink.write_line("INFO: still fine");
    }

    #[test]
    fn test_memory_sink_from_threads() {
        let sink = Arc::new(MemorySink::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for j in 0..10 {
                        sink.write_line(&format_log_line("T", &format!("{i}-{j}")));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = sink.lines();
        assert_eq!(lines.len(), 40);
        assert!(lines.iter().all(|line| line.starts_with("T: ")));
    }

    #[test]
    fn test_memory_sink_clear() {
        let sink = MemorySink::new();
        sink.write_line("a: b");
        assert_eq!(sink.contents(), "a: b\n");
        sink.clear();
        assert!(sink.contents().is_empty());
    }
}
